//! The outgoing notification email.

use serde::Serialize;

use crate::submission::ContactSubmission;

/// An email in the shape the Resend API accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

impl EmailMessage {
    /// Build the notification for a (validated) submission.
    pub fn for_submission(submission: &ContactSubmission, from: &str, to: &str) -> Self {
        let name = submission.name.trim();
        let email = submission.email.trim();
        let html = format!(
            concat!(
                "<div style=\"font-family:system-ui,Segoe UI,Roboto,Arial,sans-serif;",
                "line-height:1.6\">",
                "<h2>New portfolio message</h2>",
                "<p><strong>Name:</strong> {name}</p>",
                "<p><strong>Email:</strong> {email}</p>",
                "<pre style=\"white-space:pre-wrap\">{message}</pre>",
                "</div>"
            ),
            name = escape_html(name),
            email = escape_html(email),
            message = escape_html(&submission.message),
        );
        Self {
            from: from.to_string(),
            to: vec![to.to_string()],
            reply_to: email.to_string(),
            subject: format!("Portfolio contact from {name}"),
            html,
            text: format!("New message from {name} <{email}>\n\n{}", submission.message),
        }
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#039;Jerry&#039;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_message_escapes_user_text() {
        let submission = ContactSubmission::new("<b>Eve</b>", "eve@example.com", "1 < 2 & 3");
        let email = EmailMessage::for_submission(&submission, "Portfolio <me@x.dev>", "me@x.dev");
        assert_eq!(email.subject, "Portfolio contact from <b>Eve</b>");
        assert_eq!(email.reply_to, "eve@example.com");
        assert_eq!(email.to, vec!["me@x.dev".to_string()]);
        assert!(email.html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(email.html.contains("1 &lt; 2 &amp; 3"));
        assert!(!email.html.contains("<b>"));
        assert!(email.text.ends_with("1 < 2 & 3"));
    }
}
