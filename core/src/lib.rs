//! Client for the posts REST API.
//!
//! # Overview
//! Three layers, leaf to root:
//! - `transport`: one HTTP request per operation against `{base_url}/posts`,
//!   built and parsed by the I/O-free `PostsClient` and executed by
//!   `HttpTransport`.
//! - `service`: `PostsService` validates candidates with the pure functions in
//!   `validation` and forwards them to the transport.
//! - `factory`: `posts_service` hands out one shared service per process.
//!
//! # Design
//! - Validation runs to completion before any request is built, so invalid
//!   input has no network side effect.
//! - Every transport failure is a `TransportError` naming the operation.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod factory;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;
pub mod validation;

pub use client::PostsClient;
pub use config::Config;
pub use error::{
    ConfigurationError, Error, Operation, TransportCause, TransportError, ValidationError, Violation,
};
pub use factory::posts_service;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::PostsService;
pub use transport::{HttpTransport, Transport};
pub use types::{NewPost, Post, PostInput};
pub use validation::{validate_for_create, validate_for_update, PostCandidate};
