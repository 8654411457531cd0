//! Delivery of validated submissions
//!
//! The transport is opaque to the rest of the crate: anything implementing
//! [`Mailer`] can carry an [`Envelope`].

use serde::Serialize;
use std::sync::Mutex;

use super::submission::ContactSubmission;
use super::ContactError;

/// A message ready for delivery
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub body: String,
    /// (file name, content type, size in bytes)
    pub attachment: Option<(String, String, usize)>,
}

impl Envelope {
    pub fn for_submission(submission: &ContactSubmission, to: &str) -> Self {
        let mut body = format!(
            "Name: {}\nEmail: {}\n",
            submission.name.trim(),
            submission.email.trim()
        );
        if let Some(phone) = submission.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            body.push_str(&format!("Phone: {}\n", phone.trim()));
        }
        body.push_str(&format!("Category: {}\n\n{}\n", submission.category, submission.message.trim()));

        Self {
            to: to.to_string(),
            reply_to: submission.email.trim().to_string(),
            subject: format!("[{}] New message from {}", submission.category, submission.name.trim()),
            body,
            attachment: submission
                .attachment
                .as_ref()
                .map(|a| (a.file_name.clone(), a.content_type.clone(), a.size())),
        }
    }
}

pub trait Mailer: Send + Sync {
    fn deliver(&self, envelope: &Envelope) -> Result<(), ContactError>;
}

/// Writes envelopes to the log instead of sending them
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn deliver(&self, envelope: &Envelope) -> Result<(), ContactError> {
        log::info!(
            "mail to={} reply_to={} subject={:?} body_len={} attachment={:?}",
            envelope.to,
            envelope.reply_to,
            envelope.subject,
            envelope.body.len(),
            envelope.attachment.as_ref().map(|(name, _, size)| (name, size))
        );
        Ok(())
    }
}

/// Keeps delivered envelopes in memory (dry runs and tests)
#[derive(Debug, Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<Envelope>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Envelope> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Mailer for MemoryMailer {
    fn deliver(&self, envelope: &Envelope) -> Result<(), ContactError> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(envelope.clone());
        Ok(())
    }
}
