//! Stateless HTTP request builder and response parser for the posts API.
//!
//! # Design
//! `PostsClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`; executing the round-trip is the transport's job.
//! Any 2xx status counts as success. Failures come back as `TransportError`
//! already labelled with the operation.

use serde::de::DeserializeOwned;

use crate::error::{Operation, TransportCause, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewPost, Post};

/// Builds requests for, and parses responses from, `{base_url}/posts`.
#[derive(Debug, Clone)]
pub struct PostsClient {
    base_url: String,
}

impl PostsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: Self::normalize_base_url(base_url).to_string(),
        }
    }

    /// The form `base_url()` reports: trailing slashes removed.
    pub fn normalize_base_url(base_url: &str) -> &str {
        base_url.trim_end_matches('/')
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/posts", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_post(&self, post: &NewPost) -> Result<HttpRequest, TransportError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/posts", self.base_url),
            headers: json_headers(),
            body: Some(encode(Operation::Create, post)?),
        })
    }

    pub fn build_update_post(&self, id: i64, post: &Post) -> Result<HttpRequest, TransportError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/posts/{id}", self.base_url),
            headers: json_headers(),
            body: Some(encode(Operation::Update, post)?),
        })
    }

    pub fn build_delete_post(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/posts/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, TransportError> {
        decode(Operation::List, response)
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post, TransportError> {
        decode(Operation::Create, response)
    }

    pub fn parse_update_post(&self, response: HttpResponse) -> Result<Post, TransportError> {
        decode(Operation::Update, response)
    }

    /// The delete response body is not inspected.
    pub fn parse_delete_post(&self, response: HttpResponse) -> Result<(), TransportError> {
        check_status(Operation::Delete, &response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode<T: serde::Serialize>(operation: Operation, value: &T) -> Result<String, TransportError> {
    serde_json::to_string(value)
        .map_err(|e| TransportError::new(operation, TransportCause::Encode(e.to_string())))
}

fn decode<T: DeserializeOwned>(operation: Operation, response: HttpResponse) -> Result<T, TransportError> {
    check_status(operation, &response)?;
    serde_json::from_str(&response.body)
        .map_err(|e| TransportError::new(operation, TransportCause::Decode(e.to_string())))
}

fn check_status(operation: Operation, response: &HttpResponse) -> Result<(), TransportError> {
    if response.is_success() {
        return Ok(());
    }
    Err(TransportError::new(
        operation,
        TransportCause::Status {
            status: response.status,
            body: response.body.clone(),
        },
    ))
}
