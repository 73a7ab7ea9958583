//! Upstream API client
//!
//! Fetches the latest revision of a page and derives its short description.

use std::time::Instant;

use reqwest::ClientBuilder;

use super::title::{escape_title, normalize_title};
use super::types::{PageSummary, WikiResponse};
use crate::config::UpstreamConfig;
use crate::error::WikiError;
use crate::logger;

/// Fixed query parameters around the escaped title
const QUERY_PREFIX: &str = "action=query&prop=revisions&titles=";
const QUERY_SUFFIX: &str = "&rvlimit=1&formatversion=2&format=json&rvprop=content";

/// Client for the encyclopedia revisions API
///
/// Holds a pooled `reqwest::Client`; no per-request state is kept.
#[derive(Debug, Clone)]
pub struct WikiClient {
    http: reqwest::Client,
    api_url: String,
}

impl WikiClient {
    /// Build a client from the upstream configuration
    ///
    /// No request timeout is set; the transport defaults apply.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http = ClientBuilder::new()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
        })
    }

    /// Full request URL for a raw page name
    pub fn revision_url(&self, name: &str) -> String {
        let title = escape_title(&normalize_title(name));
        format!("{}?{QUERY_PREFIX}{title}{QUERY_SUFFIX}", self.api_url)
    }

    /// Fetch the latest revision of `name` and extract its short description
    pub async fn fetch_latest_revision(&self, name: &str) -> Result<PageSummary, WikiError> {
        let url = self.revision_url(name);
        logger::log_debug(&format!("[Upstream] GET {url}"));
        let started = Instant::now();

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WikiError::Status(status));
        }
        let body = response.bytes().await?;
        logger::log_debug(&format!(
            "[Upstream] {status} ({} bytes) in {} ms",
            body.len(),
            started.elapsed().as_millis()
        ));

        let wiki_response: WikiResponse = serde_json::from_slice(&body)?;
        summarize(wiki_response)
    }
}

/// Reduce a decoded response to the first page's title and description
fn summarize(response: WikiResponse) -> Result<PageSummary, WikiError> {
    let page = response
        .query
        .pages
        .into_iter()
        .next()
        .ok_or(WikiError::NoPages)?;
    let mut revision = page
        .revisions
        .into_iter()
        .next()
        .ok_or(WikiError::NoRevisions)?;
    revision.normalize_header();

    Ok(PageSummary {
        title: page.title,
        short_description: revision.header.short_description,
    })
}
