// Connection handling module
// Accepts a single TCP connection and serves it on its own task

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hyper::body::{Body, Incoming};
use hyper::header::{HeaderName, REFERER, USER_AGENT};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Version};
use hyper_util::rt::TokioIo;
use tokio::time::Instant;

use crate::config;
use crate::handler;
use crate::logger::{self, AccessLogEntry};

/// Accept and process a connection, checking limits.
///
/// # Arguments
///
/// * `stream` - The TCP stream to handle
/// * `peer_addr` - The peer's socket address
/// * `state` - Shared application state
/// * `conn_counter` - Active connection counter
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<config::AppState>,
    conn_counter: &Arc<AtomicUsize>,
) {
    // Increment counter first, then check limit (prevents race condition)
    let prev_count = conn_counter.fetch_add(1, Ordering::SeqCst);

    if let Some(max_conn) = state.config.performance.max_connections {
        if prev_count >= usize::try_from(max_conn).unwrap_or(usize::MAX) {
            // Exceeded limit: rollback counter and reject
            conn_counter.fetch_sub(1, Ordering::SeqCst);
            logger::log_warning(&format!(
                "Max connections reached: {prev_count}/{max_conn}. Connection from {peer_addr} rejected."
            ));
            drop(stream);
            return;
        }
    }

    logger::log_debug(&format!("[Connection] Accepted from: {peer_addr}"));

    handle_connection(
        stream,
        peer_addr,
        Arc::clone(state),
        Arc::clone(conn_counter),
    );
}

/// Idle tracking for one connection
///
/// A connection is idle when no request is being handled. Idle time is
/// limited by `read_timeout` until the first response and by
/// `keep_alive_timeout` afterwards; time spent inside the handler never
/// counts.
struct ConnectionActivity {
    opened: Instant,
    /// Milliseconds since `opened` at the last request start or finish
    last_active_ms: AtomicU64,
    in_flight: AtomicUsize,
    served: AtomicBool,
}

impl ConnectionActivity {
    fn new() -> Self {
        Self {
            opened: Instant::now(),
            last_active_ms: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            served: AtomicBool::new(false),
        }
    }

    fn touch(&self) {
        let elapsed = u64::try_from(self.opened.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.last_active_ms.store(elapsed, Ordering::SeqCst);
    }

    fn request_started(&self) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.touch();
    }

    fn request_finished(&self) {
        self.touch();
        self.served.store(true, Ordering::SeqCst);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn has_served(&self) -> bool {
        self.served.load(Ordering::SeqCst)
    }

    /// When the idle limit runs out, or `None` while a request is in flight
    fn idle_deadline(&self, read_limit: Duration, keep_alive_limit: Duration) -> Option<Instant> {
        if self.in_flight.load(Ordering::SeqCst) > 0 {
            return None;
        }
        let limit = if self.has_served() {
            keep_alive_limit
        } else {
            read_limit
        };
        let last_active = Duration::from_millis(self.last_active_ms.load(Ordering::SeqCst));
        Some(self.opened + last_active + limit)
    }
}

/// Handle a single connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Configures HTTP/1.1 keep-alive
/// 3. Serves every request with the lookup handler, writing access log entries
/// 4. Closes the connection gracefully once it has been idle too long
/// 5. Decrements the connection counter when done
fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: Arc<config::AppState>,
    conn_counter: Arc<AtomicUsize>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let performance = &state.config.performance;
        let read_limit = Duration::from_secs(performance.read_timeout);
        let keep_alive_limit = Duration::from_secs(performance.keep_alive_timeout);

        let mut builder = http1::Builder::new();
        builder.keep_alive(performance.keep_alive_timeout > 0);

        let activity = Arc::new(ConnectionActivity::new());
        let service_activity = Arc::clone(&activity);
        let service_state = Arc::clone(&state);
        let conn = builder.serve_connection(
            io,
            service_fn(move |req: Request<Incoming>| {
                let state = Arc::clone(&service_state);
                let activity = Arc::clone(&service_activity);
                async move {
                    activity.request_started();
                    let started = Instant::now();
                    let entry = access_entry(&req, peer_addr);
                    let response = handler::handle_request(req, Arc::clone(&state)).await;

                    let logging = &state.config.logging;
                    if logging.access_log {
                        if let Ok(resp) = &response {
                            let mut entry = entry;
                            entry.status = resp.status().as_u16();
                            entry.body_bytes = resp
                                .body()
                                .size_hint()
                                .exact()
                                .and_then(|n| usize::try_from(n).ok())
                                .unwrap_or_default();
                            entry.request_time_us =
                                u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
                            logger::log_access(&entry, &logging.access_log_format);
                        }
                    }
                    activity.request_finished();
                    response
                }
            }),
        );
        let mut conn = std::pin::pin!(conn);
        let mut closing = false;

        let result = loop {
            // Re-check at least once per read limit while a request is running
            let wake_at = match activity.idle_deadline(read_limit, keep_alive_limit) {
                Some(deadline) if !closing => deadline,
                _ => Instant::now() + read_limit.max(Duration::from_secs(1)),
            };

            tokio::select! {
                result = conn.as_mut() => break result,

                () = tokio::time::sleep_until(wake_at) => {
                    let expired = activity
                        .idle_deadline(read_limit, keep_alive_limit)
                        .is_some_and(|deadline| deadline <= Instant::now());
                    if expired && !closing {
                        logger::log_debug(&format!("[Connection] Closing idle connection from {peer_addr}"));
                        // No request was ever handled, drop the socket
                        if !activity.has_served() {
                            break Ok(());
                        }
                        conn.as_mut().graceful_shutdown();
                        closing = true;
                    }
                }
            }
        };

        if let Err(err) = result {
            logger::log_connection_error(&err);
        }

        conn_counter.fetch_sub(1, Ordering::SeqCst);
    });
}

/// Start an access log entry from the request line and headers
fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header = |name: HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = http_version(req.version()).to_string();
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry
}

const fn http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
