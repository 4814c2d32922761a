// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Fixed-window per-IP rate limiting for the API surface.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Window and budget mirroring the production deployment: 30 requests per
/// client IP per minute across all `/api` routes.
pub const API_MAX_REQUESTS: usize = 30;
pub const API_WINDOW_SECS: u64 = 60;

/// Per-IP fixed-window request counter. Shared across requests behind a
/// mutex; entries outside the window are pruned on every check.
#[derive(Clone)]
pub struct RateLimiter {
    requests: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window_secs: u64) -> Self {
        Self {
            requests: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Record one request from `ip`. Returns the retry delay when the
    /// window budget is already spent.
    pub fn check(&self, ip: IpAddr) -> Result<(), Duration> {
        let now = Instant::now();
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Prune every client and drop the ones with no requests left in the
        // window, so one-off addresses cannot grow the map without bound.
        requests.retain(|_, entries| {
            entries.retain(|&instant| now.duration_since(instant) < self.window);
            !entries.is_empty()
        });

        let entries = requests.entry(ip).or_default();

        if entries.len() >= self.max_requests {
            let oldest = entries.first().copied().unwrap_or(now);
            return Err(self.window.saturating_sub(now.duration_since(oldest)));
        }

        entries.push(now);
        Ok(())
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

/// Resolve the client IP. The socket peer address wins: everything in
/// `X-Forwarded-For` except the hop appended by a trusted proxy is
/// client-controlled, so the header is consulted only when no peer address
/// is known, and then only its last (proxy-appended) hop.
fn client_ip(request: &Request) -> IpAddr {
    if let Some(info) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return info.0.ip();
    }

    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|forwarded| forwarded.rsplit(',').next())
        .and_then(|hop| hop.trim().parse().ok())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

/// Axum middleware applying the limiter to every request it wraps.
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    match limiter.check(client_ip(&request)) {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            let body = Json(json!({ "error": "Too many requests" }));
            let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
            if let Ok(value) = retry_after.as_secs().to_string().parse() {
                response.headers_mut().insert("Retry-After", value);
            }
            response
        }
    }
}
