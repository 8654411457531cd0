//! Contact, support and careers form records

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ContactError, ContactSettings};

/// Which form the visitor used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Contact,
    Support,
    Careers,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Contact => "Contact",
            Category::Support => "Support",
            Category::Careers => "Careers",
        };
        f.write_str(label)
    }
}

/// Content types accepted for résumé uploads
pub const RESUME_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Uploaded file (careers form only)
///
/// `data` travels as a standard base64 string, so a file grows by a third
/// on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    #[serde(default, with = "base64_data")]
    pub data: Vec<u8>,
}

mod base64_data {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text.trim()).map_err(D::Error::custom)
    }
}

impl Attachment {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// A submitted form, as posted by the site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub category: Category,
    pub message: String,
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

impl ContactSubmission {
    /// Check the record against the configured limits
    pub fn validate(&self, settings: &ContactSettings) -> Result<(), ContactError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ContactError::MissingField("name"));
        }
        if name.chars().count() > settings.max_name_chars {
            return Err(ContactError::TooLong {
                field: "name",
                max: settings.max_name_chars,
            });
        }

        if !is_plausible_email(self.email.trim()) {
            return Err(ContactError::InvalidEmail(self.email.clone()));
        }

        if let Some(phone) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            if !is_plausible_phone(phone) {
                return Err(ContactError::InvalidPhone(phone.to_string()));
            }
        }

        let message = self.message.trim();
        if message.is_empty() {
            return Err(ContactError::MissingField("message"));
        }
        if message.chars().count() > settings.max_message_chars {
            return Err(ContactError::TooLong {
                field: "message",
                max: settings.max_message_chars,
            });
        }

        if let Some(attachment) = &self.attachment {
            if self.category != Category::Careers {
                return Err(ContactError::AttachmentNotAllowed(self.category));
            }
            if attachment.size() > settings.max_attachment_bytes {
                return Err(ContactError::AttachmentTooLarge {
                    size: attachment.size(),
                    max: settings.max_attachment_bytes,
                });
            }
            if !RESUME_CONTENT_TYPES.contains(&attachment.content_type.as_str()) {
                return Err(ContactError::UnsupportedAttachment(attachment.content_type.clone()));
            }
        }

        Ok(())
    }
}

/// One `@`, non-empty local part, dotted domain without empty labels
fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// 10 to 15 digits, allowing spaces, dashes and a leading `+`
fn is_plausible_phone(phone: &str) -> bool {
    let trimmed = phone.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if !body.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '-') {
        return false;
    }
    let digits = body.chars().filter(char::is_ascii_digit).count();
    (10..=15).contains(&digits)
}
