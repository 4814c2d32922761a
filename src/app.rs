// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Application state and router construction.
//!
//! This module is `pub` so that integration tests can build a test router
//! directly without starting the full binary.

use crate::routes::{api_router, FormsApiDoc};
use crate::services::logging::log_request;
use crate::services::mailer::Mailer;
use crate::services::rate_limit::{
    rate_limit_middleware, RateLimiter, API_MAX_REQUESTS, API_WINDOW_SECS,
};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    middleware, Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Mirrors the 100kb JSON body cap of the original deployment.
const MAX_BODY_BYTES: usize = 100 * 1024;

/// Same-origin policy plus the embed origins the marketing pages use
/// (YouTube / Vimeo players, Google Maps).
const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
    script-src 'self' 'unsafe-inline'; \
    style-src 'self' 'unsafe-inline'; \
    img-src 'self' data: blob: https:; \
    font-src 'self' data:; \
    connect-src 'self' blob: https:; \
    frame-src 'self' https://www.youtube.com https://www.youtube-nocookie.com \
    https://player.vimeo.com https://www.google.com https://maps.google.com; \
    media-src 'self' blob: https:; \
    object-src 'none'; \
    form-action 'self'; \
    base-uri 'self'";

/// Shared application state injected into every route handler via
/// `State<AppState>`. The mailer is the only cross-request resource and is
/// read-only after construction.
#[derive(Clone)]
pub struct AppState {
    pub mailer: Arc<dyn Mailer>,
}

/// Build the Axum application router.
///
/// The API lives under `/api` with its own rate limit, body cap, and JSON
/// 404; everything else falls through to the SPA build directory, with
/// `index.html` served for unknown paths so client-side routing works.
/// Security headers apply to every response, not just the API.
pub fn create_router(state: AppState, build_dir: &Path) -> Router {
    let limiter = RateLimiter::new(API_MAX_REQUESTS, API_WINDOW_SECS);

    let api = api_router()
        .layer(middleware::from_fn_with_state(
            limiter,
            rate_limit_middleware,
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state);

    let spa =
        ServeDir::new(build_dir).not_found_service(ServeFile::new(build_dir.join("index.html")));

    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", FormsApiDoc::openapi()))
        .fallback_service(spa)
        .layer(middleware::from_fn(log_request))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
}
