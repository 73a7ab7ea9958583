//! Error types
//!
//! The `Display` text of each variant is what ends up in the response
//! envelope's `message` field.

use reqwest::StatusCode;
use thiserror::Error;

/// Failures while looking up a page upstream
#[derive(Error, Debug)]
pub enum WikiError {
    /// Connection, TLS or body read failure
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success HTTP status
    #[error("upstream returned status {0}")]
    Status(StatusCode),

    /// The body was not the expected JSON document
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// The query matched no page
    #[error("no result found")]
    NoPages,

    /// The first page has no revision
    #[error("no result found")]
    NoRevisions,
}

/// Failures while parsing the inbound query string
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid URL escape {0:?}")]
    MalformedEscape(String),

    #[error("invalid UTF-8 in query escape")]
    InvalidUtf8,

    #[error("invalid semicolon separator in query")]
    Semicolon,
}
