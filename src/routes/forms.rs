// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Form submission route handlers.
//!
//! Each handler validates one transient submission, composes the operator
//! notification email, and hands it to the mail transport. Nothing is
//! stored; a submission either produces one outbound email or is rejected
//! synchronously.

use crate::app::AppState;
use crate::models::forms::{ContactRequest, SubscribeRequest, TestimonialRequest};
use crate::models::response::{ErrorResponse, HealthResponse, OkResponse};
use crate::services::compose::{self, ContactSubmission, TestimonialSubmission};
use crate::services::logging::anonymize_email;
use crate::services::sanitize::{clamp, is_email, trim};
use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use utoipa::OpenApi;

/// Messages beyond this length are rejected outright.
const MAX_MESSAGE_CHARS: usize = 5000;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn send_failed(message: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

/// Create the `/api` router. The rate-limit layer and body-size limit are
/// applied by the caller in `app::create_router`.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/contact", post(contact_handler).options(preflight_handler))
        .route(
            "/subscribe",
            post(subscribe_handler).options(preflight_handler),
        )
        .route(
            "/testimonials",
            post(testimonial_handler).options(preflight_handler),
        )
        .fallback(api_not_found)
}

/// OpenAPI description of the form submission API.
#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        contact_handler,
        subscribe_handler,
        testimonial_handler
    ),
    components(schemas(
        ContactRequest,
        SubscribeRequest,
        TestimonialRequest,
        OkResponse,
        ErrorResponse,
        HealthResponse
    ))
)]
pub struct FormsApiDoc;

/// Empty answer for cross-origin preflight probes.
async fn preflight_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// GET /api/health - Liveness probe.
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Server is up", body = HealthResponse))
)]
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        time: Utc::now().to_rfc3339(),
    })
}

/// POST /api/contact - Forward a contact form submission to the studio inbox.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message forwarded", body = OkResponse),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 413, description = "Message too large", body = ErrorResponse),
        (status = 500, description = "Mail transport failure", body = ErrorResponse)
    )
)]
async fn contact_handler(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let name = trim(&payload.name);
    let email = trim(&payload.email);
    let phone = trim(&payload.phone);
    let message = trim(&payload.message);
    let subject = match trim(&payload.subject) {
        "" => "New contact message",
        s => s,
    };

    // Checked in order: name, email, message. The first failing rule wins.
    if name.is_empty() {
        return Err(bad_request("Please enter your name."));
    }
    if !is_email(email) {
        return Err(bad_request("Please enter a valid email."));
    }
    if message.chars().count() < 3 {
        return Err(bad_request("Please add a message."));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err((
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ErrorResponse {
                error: "Message too large.".to_string(),
            }),
        ));
    }

    let email_out = compose::contact_email(&ContactSubmission {
        name,
        email,
        phone,
        subject,
        message,
    });

    match state.mailer.send(&email_out).await {
        Ok(id) => {
            println!("Email sent (contact): {}", id);
            Ok(Json(OkResponse::new()))
        }
        Err(e) => {
            // Provider detail stays server-side; the client gets a generic line.
            eprintln!("Mailer error (contact): {:#}", e);
            Err(send_failed("Could not send message. Please try again later."))
        }
    }
}

/// POST /api/subscribe - Notify the operator of a new newsletter subscriber.
#[utoipa::path(
    post,
    path = "/api/subscribe",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Subscriber forwarded", body = OkResponse),
        (status = 400, description = "Invalid email", body = ErrorResponse),
        (status = 500, description = "Mail transport failure", body = ErrorResponse)
    )
)]
async fn subscribe_handler(
    State(state): State<AppState>,
    Json(payload): Json<SubscribeRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let email = trim(&payload.email);
    if !is_email(email) {
        return Err(bad_request("Please enter a valid email."));
    }

    match state.mailer.send(&compose::subscribe_email(email)).await {
        Ok(id) => {
            println!(
                "Email sent (subscribe) for {}: {}",
                anonymize_email(email),
                id
            );
            Ok(Json(OkResponse::new()))
        }
        Err(e) => {
            eprintln!("Mailer error (subscribe): {:#}", e);
            Err(send_failed("Could not subscribe. Please try again later."))
        }
    }
}

/// POST /api/testimonials - Forward a testimonial submission.
#[utoipa::path(
    post,
    path = "/api/testimonials",
    request_body = TestimonialRequest,
    responses(
        (status = 200, description = "Testimonial forwarded", body = OkResponse),
        (status = 400, description = "Validation failure", body = ErrorResponse),
        (status = 500, description = "Mail transport failure", body = ErrorResponse)
    )
)]
async fn testimonial_handler(
    State(state): State<AppState>,
    Json(payload): Json<TestimonialRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let name = trim(&payload.name);
    let role = trim(&payload.role);
    let quote = trim(&payload.quote);
    let avatar = trim(&payload.avatar);
    let rating = payload
        .rating
        .as_ref()
        .map(|value| clamp(value, 1.0, 5.0))
        .unwrap_or(5.0);

    if name.is_empty() {
        return Err(bad_request("Please enter your name."));
    }
    if quote.is_empty() {
        return Err(bad_request("Please add a short quote."));
    }

    let email_out = compose::testimonial_email(&TestimonialSubmission {
        name,
        role,
        quote,
        rating,
        avatar,
    });

    match state.mailer.send(&email_out).await {
        Ok(id) => {
            println!("Email sent (testimonial): {}", id);
            Ok(Json(OkResponse::new()))
        }
        Err(e) => {
            eprintln!("Mailer error (testimonial): {:#}", e);
            Err(send_failed("Could not submit. Please try again later."))
        }
    }
}

/// JSON 404 for unknown `/api` routes, kept distinct from the SPA fallback
/// so API misses stay observable.
async fn api_not_found(method: Method, uri: Uri) -> ApiError {
    eprintln!("API 404: {} {}", method, uri);
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
}
