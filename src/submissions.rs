//! # Form submissions
//!
//! Request payloads, persisted record types, and the authoritative
//! validation rules. The browser runs the same checks before calling the
//! API, but only as a convenience; nothing here trusts the client.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

// Optional leading +, then 7-15 digits/spaces/dashes. No letters.
static PHONE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-]{7,15}$").unwrap());

#[derive(Deserialize)]
pub struct ContactPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub struct NewsletterPayload {
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscriber {
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

impl ContactPayload {
    /// Validates the payload and stamps it into a persistable record.
    ///
    /// All missing required fields are reported together rather than one at
    /// a time. The id is the submission-time millisecond timestamp, same as
    /// every record this site has ever stored.
    pub fn into_submission(self) -> Result<ContactSubmission, AppError> {
        let name = trimmed(&self.name);
        let email = trimmed(&self.email);
        let message = trimmed(&self.message);

        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push("name");
        }
        if email.is_empty() {
            missing.push("email");
        }
        if message.is_empty() {
            missing.push("message");
        }
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Required field(s) missing: {}.",
                missing.join(", ")
            )));
        }

        let email = valid_email(email)?;

        let phone = trimmed(&self.phone);
        if !phone.is_empty() && !PHONE_SHAPE.is_match(&phone) {
            return Err(AppError::Validation(
                "Please provide a valid phone number.".to_string(),
            ));
        }

        let now = Utc::now();

        Ok(ContactSubmission {
            id: now.timestamp_millis(),
            name,
            email,
            phone,
            company: trimmed(&self.company),
            message,
            submitted_at: now,
        })
    }
}

impl NewsletterPayload {
    pub fn into_subscriber(self) -> Result<NewsletterSubscriber, AppError> {
        let email = trimmed(&self.email);
        if email.is_empty() {
            return Err(AppError::Validation("Email is required.".to_string()));
        }

        Ok(NewsletterSubscriber {
            email: valid_email(email)?,
            subscribed_at: Utc::now(),
        })
    }
}

fn trimmed(field: &Option<String>) -> String {
    field.as_deref().unwrap_or("").trim().to_string()
}

fn valid_email(email: String) -> Result<String, AppError> {
    if EMAIL_SHAPE.is_match(&email) {
        Ok(email)
    } else {
        Err(AppError::Validation(
            "Please provide a valid email address.".to_string(),
        ))
    }
}
