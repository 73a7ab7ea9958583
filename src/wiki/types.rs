// Upstream response types
// Shape of a `formatversion=2` revisions query

use serde::{Deserialize, Serialize};

/// Top-level API response
#[derive(Debug, Deserialize, Default)]
pub struct WikiResponse {
    #[serde(default)]
    pub query: WikiQuery,
}

#[derive(Debug, Deserialize, Default)]
pub struct WikiQuery {
    #[serde(default)]
    pub pages: Vec<WikiPage>,
}

#[derive(Debug, Deserialize, Default)]
pub struct WikiPage {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub revisions: Vec<WikiRevision>,
}

#[derive(Debug, Deserialize, Default)]
pub struct WikiRevision {
    #[serde(default)]
    pub content: String,
    /// Derived from `content` by `normalize_header`, never sent by the API
    #[serde(skip)]
    pub header: WikiRevisionHeader,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WikiRevisionHeader {
    pub short_description: String,
}

/// Resolved page title and its short description
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub title: String,
    pub short_description: String,
}
