//! The HTTP collaborator behind `PostsService`.
//!
//! # Design
//! `Transport` is the seam the service is generic over: one method per remote
//! operation, each returning a `TransportError` on any failure. `HttpTransport`
//! is the real implementation. It validates the base URL when constructed,
//! builds requests with `PostsClient`, executes them with a `ureq::Agent`, and
//! hands the raw response back to `PostsClient` for status and body checks.
//! The agent is configured not to treat 4xx/5xx as errors so that status
//! interpretation lives in one place.

use std::fmt;

use url::Url;

use crate::client::PostsClient;
use crate::error::{ConfigurationError, Operation, TransportCause, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewPost, Post};

/// Remote operations on the posts resource.
pub trait Transport {
    /// `GET {base}/posts`
    fn list(&self) -> Result<Vec<Post>, TransportError>;

    /// `POST {base}/posts`
    fn create(&self, post: &NewPost) -> Result<Post, TransportError>;

    /// `PUT {base}/posts/{id}`
    fn update(&self, id: i64, post: &Post) -> Result<Post, TransportError>;

    /// `DELETE {base}/posts/{id}`
    fn delete(&self, id: i64) -> Result<(), TransportError>;
}

/// Blocking `Transport` over HTTP/1.1 + JSON.
pub struct HttpTransport {
    client: PostsClient,
    agent: ureq::Agent,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.client.base_url())
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Fails with `ConfigurationError` unless `base_url` is an absolute
    /// `http` or `https` URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigurationError> {
        check_base_url(base_url)?;
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Ok(Self {
            client: PostsClient::new(base_url),
            agent,
        })
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    fn execute(&self, operation: Operation, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        tracing::debug!(method = req.method.as_str(), url = %req.path, "sending request");

        let result = match req.method {
            HttpMethod::Get => with_headers(self.agent.get(&req.path), &req.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&req.path), &req.headers).call(),
            HttpMethod::Post => send(with_headers(self.agent.post(&req.path), &req.headers), req.body),
            HttpMethod::Put => send(with_headers(self.agent.put(&req.path), &req.headers), req.body),
        };

        let mut response = result.map_err(|e| network_failure(operation, e))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| network_failure(operation, e))?;

        tracing::debug!(status, url = %req.path, "received response");
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

impl Transport for HttpTransport {
    fn list(&self) -> Result<Vec<Post>, TransportError> {
        let req = self.client.build_list_posts();
        let response = self.execute(Operation::List, req)?;
        self.client.parse_list_posts(response).inspect_err(log_failure)
    }

    fn create(&self, post: &NewPost) -> Result<Post, TransportError> {
        let req = self.client.build_create_post(post)?;
        let response = self.execute(Operation::Create, req)?;
        self.client.parse_create_post(response).inspect_err(log_failure)
    }

    fn update(&self, id: i64, post: &Post) -> Result<Post, TransportError> {
        let req = self.client.build_update_post(id, post)?;
        let response = self.execute(Operation::Update, req)?;
        self.client.parse_update_post(response).inspect_err(log_failure)
    }

    fn delete(&self, id: i64) -> Result<(), TransportError> {
        let req = self.client.build_delete_post(id);
        let response = self.execute(Operation::Delete, req)?;
        self.client.parse_delete_post(response).inspect_err(log_failure)
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<String>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

fn network_failure(operation: Operation, err: ureq::Error) -> TransportError {
    let err = TransportError::new(operation, TransportCause::Network(err.to_string()));
    log_failure(&err);
    err
}

fn log_failure(err: &TransportError) {
    tracing::warn!(error = %err, "posts request failed");
}

fn check_base_url(base_url: &str) -> Result<(), ConfigurationError> {
    let invalid = |reason: String| ConfigurationError {
        base_url: base_url.to_string(),
        reason,
    };

    if base_url.trim().is_empty() {
        return Err(invalid("base URL is empty".to_string()));
    }
    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("base URL must not carry a query or fragment".to_string()));
    }
    Ok(())
}
