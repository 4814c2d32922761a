// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Notification email composition.
//!
//! Each submission kind renders a plain-text and an HTML body from
//! compile-time templates. User text is HTML-escaped on the HTML path only.

use crate::services::mailer::OutgoingEmail;
use crate::services::sanitize::escape_html;

/// Email template with simple variable substitution.
struct EmailTemplate {
    content: &'static str,
}

impl EmailTemplate {
    const fn new(content: &'static str) -> Self {
        Self { content }
    }

    fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut result = self.content.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render with every variable HTML-escaped first.
    fn render_escaped(&self, vars: &[(&str, &str)]) -> String {
        let escaped: Vec<(&str, String)> = vars
            .iter()
            .map(|(key, value)| (*key, escape_html(value)))
            .collect();
        let borrowed: Vec<(&str, &str)> = escaped
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
            .collect();
        self.render(&borrowed)
    }
}

// Email templates loaded at compile time
const CONTACT_TEXT: EmailTemplate =
    EmailTemplate::new(include_str!("../../templates/emails/contact.txt"));
const CONTACT_HTML: EmailTemplate =
    EmailTemplate::new(include_str!("../../templates/emails/contact.html"));
const SUBSCRIBE_TEXT: EmailTemplate =
    EmailTemplate::new(include_str!("../../templates/emails/subscribe.txt"));
const SUBSCRIBE_HTML: EmailTemplate =
    EmailTemplate::new(include_str!("../../templates/emails/subscribe.html"));
const TESTIMONIAL_TEXT: EmailTemplate =
    EmailTemplate::new(include_str!("../../templates/emails/testimonial.txt"));
const TESTIMONIAL_HTML: EmailTemplate =
    EmailTemplate::new(include_str!("../../templates/emails/testimonial.html"));

/// Validated contact form fields, already trimmed.
#[derive(Debug)]
pub struct ContactSubmission<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
}

/// Validated testimonial fields, already trimmed and clamped.
#[derive(Debug)]
pub struct TestimonialSubmission<'a> {
    pub name: &'a str,
    pub role: &'a str,
    pub quote: &'a str,
    pub rating: f64,
    pub avatar: &'a str,
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Compose the operator notification for a contact submission. Reply-to is
/// the submitter so the operator can answer directly from their inbox.
pub fn contact_email(submission: &ContactSubmission<'_>) -> OutgoingEmail {
    let vars = [
        ("name", submission.name),
        ("email", submission.email),
        ("phone", or_dash(submission.phone)),
        ("subject", submission.subject),
        ("message", submission.message),
    ];

    OutgoingEmail {
        subject: format!("Contact • {}", submission.subject),
        text: CONTACT_TEXT.render(&vars),
        html: Some(CONTACT_HTML.render_escaped(&vars)),
        reply_to: Some(submission.email.to_string()),
    }
}

/// Compose the operator notification for a new newsletter subscriber.
pub fn subscribe_email(email: &str) -> OutgoingEmail {
    let vars = [("email", email)];

    OutgoingEmail {
        subject: "Newsletter • New subscriber".to_string(),
        text: SUBSCRIBE_TEXT.render(&vars),
        html: Some(SUBSCRIBE_HTML.render_escaped(&vars)),
        reply_to: None,
    }
}

/// Compose the operator notification for a testimonial submission.
pub fn testimonial_email(submission: &TestimonialSubmission<'_>) -> OutgoingEmail {
    let rating = submission.rating.to_string();
    let vars = [
        ("name", submission.name),
        ("role", or_dash(submission.role)),
        ("rating", rating.as_str()),
        ("avatar", or_dash(submission.avatar)),
        ("quote", submission.quote),
    ];

    OutgoingEmail {
        subject: "Testimonial • New submission".to_string(),
        text: TESTIMONIAL_TEXT.render(&vars),
        html: Some(TESTIMONIAL_HTML.render_escaped(&vars)),
        reply_to: None,
    }
}
