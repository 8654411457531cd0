//! Contact, support and careers submission boundary

mod mailer;
mod submission;

pub use mailer::{Envelope, LogMailer, Mailer, MemoryMailer};
pub use submission::{Attachment, Category, ContactSubmission, RESUME_CONTENT_TYPES};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContactError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    #[error("invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("attachments are not accepted on the {0} form")]
    AttachmentNotAllowed(Category),

    #[error("attachment is {size} bytes, limit is {max}")]
    AttachmentTooLarge { size: usize, max: usize },

    #[error("unsupported attachment type: {0}")]
    UnsupportedAttachment(String),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Maximum résumé size (5 MiB)
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// Limits and routing for the forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSettings {
    #[serde(default = "default_max_name_chars")]
    pub max_name_chars: usize,

    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,

    #[serde(default = "default_max_attachment_bytes")]
    pub max_attachment_bytes: usize,

    #[serde(default = "default_contact_to")]
    pub contact_to: String,

    #[serde(default = "default_support_to")]
    pub support_to: String,

    #[serde(default = "default_careers_to")]
    pub careers_to: String,
}

fn default_max_name_chars() -> usize { 100 }
fn default_max_message_chars() -> usize { 5_000 }
fn default_max_attachment_bytes() -> usize { MAX_ATTACHMENT_BYTES }
fn default_contact_to() -> String { "hello@example.in".to_string() }
fn default_support_to() -> String { "support@example.in".to_string() }
fn default_careers_to() -> String { "careers@example.in".to_string() }

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            max_name_chars: default_max_name_chars(),
            max_message_chars: default_max_message_chars(),
            max_attachment_bytes: default_max_attachment_bytes(),
            contact_to: default_contact_to(),
            support_to: default_support_to(),
            careers_to: default_careers_to(),
        }
    }
}

impl ContactSettings {
    pub fn recipient(&self, category: Category) -> &str {
        match category {
            Category::Contact => &self.contact_to,
            Category::Support => &self.support_to,
            Category::Careers => &self.careers_to,
        }
    }
}

/// Acknowledgement returned to the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub category: Category,
    pub received_at: DateTime<Utc>,
}

/// Validate, route and deliver a submission
pub fn submit(
    submission: &ContactSubmission,
    settings: &ContactSettings,
    mailer: &dyn Mailer,
) -> Result<Receipt, ContactError> {
    submission.validate(settings)?;

    let envelope = Envelope::for_submission(submission, settings.recipient(submission.category));
    mailer.deliver(&envelope)?;

    log::info!("{} submission delivered to {}", submission.category, envelope.to);
    Ok(Receipt {
        category: submission.category,
        received_at: Utc::now(),
    })
}
