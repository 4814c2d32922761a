// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Request payloads for the form submission API.
//!
//! Every field defaults when absent so that a missing field surfaces as a
//! validation message ("Please enter your name.") rather than a
//! deserialization rejection.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Contact form submission.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Defaults to "New contact message" when empty.
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Newsletter subscription. The address is forwarded to the operator; no
/// subscriber list is kept server-side.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: String,
}

/// Testimonial submission.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TestimonialRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub quote: String,
    /// Accepts any JSON value; coerced and clamped to 1-5, default 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub rating: Option<serde_json::Value>,
    /// Avatar URL, accepted as an opaque string.
    #[serde(default)]
    pub avatar: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_request_missing_fields_default_to_empty() {
        let payload: ContactRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.name, "");
        assert_eq!(payload.email, "");
        assert_eq!(payload.subject, "");
    }

    #[test]
    fn test_testimonial_rating_accepts_any_json_value() {
        let payload: TestimonialRequest =
            serde_json::from_str(r#"{"name":"Bo","quote":"q","rating":"abc"}"#).unwrap();
        assert_eq!(payload.rating, Some(serde_json::json!("abc")));

        let payload: TestimonialRequest =
            serde_json::from_str(r#"{"name":"Bo","quote":"q"}"#).unwrap();
        assert!(payload.rating.is_none());
    }
}
