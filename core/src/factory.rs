//! Process-wide `PostsService`.
//!
//! The first successful call fixes the base URL for the rest of the process;
//! later calls get the same instance back whatever URL they pass. Callers that
//! need a different URL construct `HttpTransport` and `PostsService` directly.

use once_cell::sync::OnceCell;

use crate::client::PostsClient;
use crate::error::Error;
use crate::service::PostsService;
use crate::transport::HttpTransport;

static POSTS_SERVICE: OnceCell<PostsService<HttpTransport>> = OnceCell::new();

/// Shared service bound to the first `base_url` this was called with.
///
/// Concurrent first calls build at most one instance. A construction failure
/// is returned and nothing is stored, so a later call may still succeed.
pub fn posts_service(base_url: &str) -> Result<&'static PostsService<HttpTransport>, Error> {
    let service = POSTS_SERVICE.get_or_try_init(|| {
        let transport = HttpTransport::new(base_url)?;
        tracing::debug!(base_url = transport.base_url(), "initialized posts service");
        Ok::<_, Error>(PostsService::new(transport))
    })?;

    if service.transport().base_url() != PostsClient::normalize_base_url(base_url) {
        tracing::debug!(
            requested = base_url,
            bound = service.transport().base_url(),
            "posts service already bound to another base URL"
        );
    }
    Ok(service)
}
