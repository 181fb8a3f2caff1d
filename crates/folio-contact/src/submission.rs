//! The submission payload and its validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ContactError;

/// A contact form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Hidden field that only bots fill in.
    #[serde(default, alias = "botField")]
    pub honeypot: String,
}

/// Why a submission was refused before sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required.")]
    MissingFields,
    #[error("Please enter a valid email.")]
    InvalidEmail,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            honeypot: String::new(),
        }
    }

    /// Whether the honeypot was filled in.
    pub fn is_spam(&self) -> bool {
        !self.honeypot.is_empty()
    }

    /// Check that every field is present and the email looks like one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.message.trim().is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(())
    }
}

/// Loose shape check: `local@domain.tld`, no whitespace, a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// The relay's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReply {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ContactReply {
    pub fn success() -> Self {
        Self { ok: true, error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
        }
    }

    /// Turn a negative reply into [`ContactError::Rejected`].
    pub fn into_result(self) -> Result<(), ContactError> {
        if self.ok {
            Ok(())
        } else {
            Err(ContactError::Rejected(
                self.error.unwrap_or_else(|| "Message was not accepted.".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("me@example.com"));
        assert!(is_valid_email("a.b+c@mail.example.co"));
        assert!(!is_valid_email("me@example"));
        assert!(!is_valid_email("me@.com"));
        assert!(!is_valid_email("me@example."));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("me@@example.com"));
        assert!(!is_valid_email("me @example.com"));
        assert!(!is_valid_email("meexample.com"));
    }

    #[test]
    fn test_validate() {
        let ok = ContactSubmission::new("Ada", "ada@example.com", "Hello");
        assert_eq!(ok.validate(), Ok(()));

        let blank = ContactSubmission::new("  ", "ada@example.com", "Hello");
        assert_eq!(blank.validate(), Err(ValidationError::MissingFields));

        let bad_email = ContactSubmission::new("Ada", "ada", "Hello");
        assert_eq!(bad_email.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_honeypot_alias() {
        let s: ContactSubmission = serde_json::from_str(
            r#"{"name":"a","email":"a@b.co","message":"m","botField":"x"}"#,
        )
        .unwrap();
        assert!(s.is_spam());

        let s: ContactSubmission =
            serde_json::from_str(r#"{"name":"a","email":"a@b.co","message":"m"}"#).unwrap();
        assert!(!s.is_spam());
    }

    #[test]
    fn test_reply_wire_format() {
        assert_eq!(
            serde_json::to_string(&ContactReply::success()).unwrap(),
            r#"{"ok":true}"#
        );
        let reply: ContactReply =
            serde_json::from_str(r#"{"ok":false,"error":"Invalid input."}"#).unwrap();
        assert_eq!(reply, ContactReply::failure("Invalid input."));
        assert!(matches!(
            reply.into_result(),
            Err(ContactError::Rejected(m)) if m == "Invalid input."
        ));
    }
}
