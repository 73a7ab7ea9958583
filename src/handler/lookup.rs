//! Lookup request handling
//!
//! Reads the `name` query parameter, resolves it upstream and wraps the
//! outcome in an envelope.

use std::convert::Infallible;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};

use super::envelope::Envelope;
use crate::config::AppState;
use crate::http::{build_json_response, QueryParams};
use crate::logger;
use crate::wiki::WikiClient;

/// Query parameter holding the page name
const NAME_PARAM: &str = "name";

/// Main entry point for HTTP request handling
///
/// Every path and method is answered the same way, always with `200 OK`.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let envelope = lookup(req.uri().query(), &state.wiki).await;
    Ok(build_json_response(&envelope))
}

/// Resolve a raw query string into a response envelope
pub async fn lookup(query: Option<&str>, wiki: &WikiClient) -> Envelope {
    let params = match QueryParams::parse(query.unwrap_or_default()) {
        Ok(params) => params,
        Err(e) => {
            logger::log_debug(&format!("Rejected query string: {e}"));
            return Envelope::error("error getting query parameters");
        }
    };

    let Some(name) = params.get(NAME_PARAM).filter(|n| !n.is_empty()) else {
        return Envelope::error("missing name for query");
    };

    match wiki.fetch_latest_revision(name).await {
        Ok(summary) => Envelope::success(summary),
        Err(e) => {
            logger::log_warning(&format!("Lookup of '{name}' failed: {e}"));
            Envelope::error(e.to_string())
        }
    }
}
