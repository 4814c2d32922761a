// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Logging utilities: request-line logging and sensitive data anonymization.

use axum::{extract::Request, middleware::Next, response::Response};
use chrono::Utc;

/// Anonymize an email address for logging.
/// Shows first character and domain, hides the rest: "a***@example.com"
pub fn anonymize_email(email: &str) -> String {
    if let Some((local, domain)) = email.split_once('@') {
        if local.is_empty() {
            return format!("***@{}", domain);
        }
        let first = local.chars().next().unwrap_or('*');
        format!("{}***@{}", first, domain)
    } else {
        // Invalid email format, redact completely
        "***@***".to_string()
    }
}

/// Axum middleware printing one line per request before it is handled.
pub async fn log_request(request: Request, next: Next) -> Response {
    println!(
        "[{}] {} {}",
        Utc::now().to_rfc3339(),
        request.method(),
        request.uri()
    );
    next.run(request).await
}
