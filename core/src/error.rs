//! Error types for the posts API client.
//!
//! # Design
//! Each layer owns one error type: validation produces `ValidationError`,
//! transport construction produces `ConfigurationError`, and every failed
//! HTTP round-trip produces `TransportError`. The top-level `Error` wraps all
//! three so service methods can use `?` across layers.
//!
//! `TransportError` keeps the cause as data but does not branch on it: a 404,
//! a 500 and a refused connection all read "Error <doing x>: <cause>".

use std::fmt;

use thiserror::Error;

/// Any failure surfaced by the posts client.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// A single broken shape rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Wire name of the offending field (`userId`, `id`, `title`, `body`).
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Input rejected before any network call was made.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid post: {}", join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn has_violation(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The base URL handed to the transport is unusable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid base URL {base_url:?}: {reason}")]
pub struct ConfigurationError {
    pub base_url: String,
    pub reason: String,
}

/// The transport operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::List => write!(f, "fetching posts"),
            Operation::Create => write!(f, "creating post"),
            Operation::Update => write!(f, "updating post"),
            Operation::Delete => write!(f, "deleting post"),
        }
    }
}

/// What went wrong underneath a `TransportError`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportCause {
    /// The request never produced a response.
    #[error("{0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Encode(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Decode(String),
}

/// A failed HTTP round-trip, labelled with the operation it belonged to.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Error {operation}: {cause}")]
pub struct TransportError {
    pub operation: Operation,
    pub cause: TransportCause,
}

impl TransportError {
    pub fn new(operation: Operation, cause: TransportCause) -> Self {
        Self { operation, cause }
    }
}
