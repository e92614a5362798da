//! Per-client rate limiting
//!
//! Fixed one-minute windows keyed by client IP. A window opens on a
//! client's first request; once `limit` requests have been served inside
//! it, further requests are refused until it expires.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use parking_lot::Mutex;

use crate::error::{BlogError, Result};

use super::AppState;

/// Tracked clients beyond which expired windows are swept
const SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window request counter per client IP
pub struct RateLimiter {
    /// Requests allowed per window; 0 disables limiting
    limit: u32,

    /// Window length
    window: Duration,

    /// Open window per client
    clients: Mutex<HashMap<IpAddr, Window>>,
}

impl RateLimiter {
    /// `limit` requests per minute per client (0 disables limiting)
    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.limit > 0
    }

    /// Count a request from `client` now
    pub fn check(&self, client: IpAddr) -> Result<()> {
        self.check_at(client, Instant::now())
    }

    /// Count a request from `client` at `now`
    pub fn check_at(&self, client: IpAddr, now: Instant) -> Result<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut clients = self.clients.lock();

        if clients.len() >= SWEEP_THRESHOLD {
            let window = self.window;
            clients.retain(|_, w| now.saturating_duration_since(w.started) < window);
        }

        let entry = clients.entry(client).or_insert(Window {
            started: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(entry.started);
        if elapsed >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        if entry.count >= self.limit {
            let remaining = self.window.saturating_sub(elapsed);
            let retry_after_secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
            return Err(BlogError::RateLimited {
                retry_after_secs: retry_after_secs.max(1),
            });
        }

        entry.count += 1;
        Ok(())
    }

    /// Number of clients with an open window
    pub fn tracked_clients(&self) -> usize {
        self.clients.lock().len()
    }
}

pub(super) async fn enforce_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_ip(&request);

    if let Err(e) = state.limiter.check(client) {
        tracing::warn!("Rate limit exceeded for {}", client);
        return e.into_response();
    }

    next.run(request).await
}

/// Peer IP, or `0.0.0.0` when the server was not started with connect info
fn client_ip(request: &Request) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}
