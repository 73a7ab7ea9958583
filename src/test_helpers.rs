//! Shared test helpers
//!
//! An in-process stand-in for the encyclopedia API, served with hyper on an
//! ephemeral local port.

use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::config::UpstreamConfig;

/// Running fake upstream
pub struct FakeUpstream {
    /// API endpoint URL to point a client at
    pub url: String,
    queries: Arc<Mutex<Vec<String>>>,
}

impl FakeUpstream {
    /// Query strings received so far, in arrival order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

/// Start a fake upstream answering every request with `status` and `body`
pub async fn spawn_upstream(status: u16, body: &'static str) -> FakeUpstream {
    spawn_slow_upstream(status, body, Duration::ZERO).await
}

/// Like `spawn_upstream`, but every answer is held back for `delay`
pub async fn spawn_slow_upstream(status: u16, body: &'static str, delay: Duration) -> FakeUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let queries = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&queries);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let seen = Arc::clone(&seen);
            tokio::spawn(async move {
                let service = service_fn(move |req: Request<Incoming>| {
                    seen.lock()
                        .unwrap()
                        .push(req.uri().query().unwrap_or_default().to_string());
                    async move {
                        tokio::time::sleep(delay).await;
                        Ok::<_, Infallible>(
                            Response::builder()
                                .status(status)
                                .header("Content-Type", "application/json")
                                .body(Full::new(Bytes::from(body)))
                                .unwrap(),
                        )
                    }
                });
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service)
                    .await;
            });
        }
    });

    FakeUpstream {
        url: format!("http://{addr}/w/api.php"),
        queries,
    }
}

/// Upstream configuration pointing at `api_url`
pub fn upstream_config(api_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        api_url: api_url.to_string(),
        user_agent: "wikidesc-test/0.1".to_string(),
    }
}
