//! Delivering submissions: over HTTP to a relay, or through a mailer.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::email::EmailMessage;
use crate::error::ContactError;
use crate::submission::{ContactReply, ContactSubmission};

/// Resend's send-email endpoint.
pub const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Something that can deliver a submission. One attempt, no retries.
pub trait ContactTransport: Send + Sync {
    fn send(&self, submission: &ContactSubmission) -> Result<(), ContactError>;
}

fn agent(timeout: Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .new_agent()
}

/// Posts submissions as JSON to a contact relay endpoint.
#[derive(Debug, Clone)]
pub struct EndpointTransport {
    agent: ureq::Agent,
    url: String,
}

impl EndpointTransport {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: agent(timeout),
            url: url.into(),
        }
    }
}

impl ContactTransport for EndpointTransport {
    fn send(&self, submission: &ContactSubmission) -> Result<(), ContactError> {
        submission.validate()?;

        let mut response = self.agent.post(&self.url).send_json(submission)?;
        let status = response.status();
        debug!(url = %self.url, %status, "contact relay answered");

        match response.body_mut().read_json::<ContactReply>() {
            Ok(reply) if status.is_success() => reply.into_result(),
            Ok(reply) => Err(ContactError::Rejected(
                reply
                    .error
                    .unwrap_or_else(|| format!("contact relay answered {status}")),
            )),
            Err(_) if status.is_success() => Ok(()),
            Err(_) => Err(ContactError::Rejected(format!(
                "contact relay answered {status}"
            ))),
        }
    }
}

/// Hands a finished email to an email service. Returns the message id.
pub trait Mailer: Send + Sync {
    fn deliver(&self, message: &EmailMessage) -> Result<String, ContactError>;
}

/// Resend API response, success or failure.
#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: Option<String>,
    message: Option<String>,
    name: Option<String>,
}

/// Sends email through the Resend HTTP API.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    agent: ureq::Agent,
    api_key: String,
    url: String,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: agent(timeout),
            api_key: api_key.into(),
            url: RESEND_API_URL.to_string(),
        }
    }

    /// Read the API key from an environment variable.
    pub fn from_env(var: &str, timeout: Duration) -> Result<Self, ContactError> {
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key, timeout)),
            _ => Err(ContactError::MissingSetting(var.to_string())),
        }
    }

    /// Point at a different API base, e.g. a local stub.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

impl Mailer for ResendMailer {
    fn deliver(&self, message: &EmailMessage) -> Result<String, ContactError> {
        let mut response = self
            .agent
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send_json(message)?;
        let status = response.status();
        let body: ResendResponse = response.body_mut().read_json()?;

        match body.id {
            Some(id) if status.is_success() => Ok(id),
            _ => Err(ContactError::Rejected(format!(
                "{} ({status}): {}",
                body.name.as_deref().unwrap_or("UnknownError"),
                body.message.as_deref().unwrap_or("send failed"),
            ))),
        }
    }
}

/// Screens submissions and forwards them as email.
///
/// This is the relay endpoint's behavior: honeypot hits are acknowledged
/// and dropped, invalid input is refused, everything else becomes one
/// email to the site owner.
#[derive(Debug, Clone)]
pub struct RelayTransport<M> {
    mailer: M,
    from: String,
    to: String,
}

impl<M: Mailer> RelayTransport<M> {
    pub fn new(mailer: M, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            mailer,
            from: from.into(),
            to: to.into(),
        }
    }

    /// Handle one submission and produce the reply a relay would send.
    pub fn handle(&self, submission: &ContactSubmission) -> ContactReply {
        if submission.is_spam() {
            debug!("honeypot filled, dropping submission");
            return ContactReply::success();
        }
        if submission.validate().is_err() {
            return ContactReply::failure("Invalid input.");
        }

        let message = EmailMessage::for_submission(submission, &self.from, &self.to);
        match self.mailer.deliver(&message) {
            Ok(id) => {
                info!(%id, "contact email sent");
                ContactReply::success()
            }
            Err(e) => {
                warn!(error = %e, "contact email failed");
                ContactReply::failure("Email send failed.")
            }
        }
    }
}

/// The relay handler wired to Resend.
pub type ResendTransport = RelayTransport<ResendMailer>;

impl<M: Mailer> ContactTransport for RelayTransport<M> {
    fn send(&self, submission: &ContactSubmission) -> Result<(), ContactError> {
        self.handle(submission).into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::sync::Mutex;
    use std::thread;

    #[derive(Default)]
    struct FakeMailer {
        sent: Mutex<Vec<EmailMessage>>,
        fail: bool,
    }

    impl Mailer for &FakeMailer {
        fn deliver(&self, message: &EmailMessage) -> Result<String, ContactError> {
            if self.fail {
                return Err(ContactError::Rejected("quota exceeded".to_string()));
            }
            let mut sent = self.sent.lock().unwrap();
            sent.push(message.clone());
            Ok(format!("msg-{}", sent.len()))
        }
    }

    fn valid() -> ContactSubmission {
        ContactSubmission::new("Ada", "ada@example.com", "Loved the blog!")
    }

    fn timeout() -> Duration {
        Duration::from_secs(5)
    }

    /// Read one request, headers plus a `Content-Length` body.
    fn read_request(stream: &mut TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 1024];
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&data);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if data.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).into_owned()
    }

    /// A local server answering a single request with `status` and a JSON `body`.
    fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let server = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            request
        });
        (url, server)
    }

    /// URL of a port nothing listens on.
    fn closed_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}/api/contact")
    }

    #[test]
    fn test_relay_sends_one_email() {
        let mailer = FakeMailer::default();
        let relay = RelayTransport::new(&mailer, "Portfolio <me@x.dev>", "me@x.dev");

        assert_eq!(relay.handle(&valid()), ContactReply::success());
        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].reply_to, "ada@example.com");
        assert_eq!(sent[0].subject, "Portfolio contact from Ada");
    }

    #[test]
    fn test_relay_drops_honeypot() {
        let mailer = FakeMailer::default();
        let relay = RelayTransport::new(&mailer, "from@x.dev", "me@x.dev");
        let mut spam = valid();
        spam.honeypot = "https://spam.example".to_string();

        assert_eq!(relay.handle(&spam), ContactReply::success());
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_relay_refuses_invalid_input() {
        let mailer = FakeMailer::default();
        let relay = RelayTransport::new(&mailer, "from@x.dev", "me@x.dev");
        let bad = ContactSubmission::new("Ada", "not-an-email", "hi");

        assert_eq!(relay.handle(&bad), ContactReply::failure("Invalid input."));
        assert!(mailer.sent.lock().unwrap().is_empty());
        let err = relay.send(&bad).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input.");
    }

    #[test]
    fn test_relay_honeypot_wins_over_invalid_input() {
        let mailer = FakeMailer::default();
        let relay = RelayTransport::new(&mailer, "from@x.dev", "me@x.dev");
        let mut bot = ContactSubmission::new("", "bot", "");
        bot.honeypot = "x".to_string();

        assert_eq!(relay.handle(&bot), ContactReply::success());
        assert!(relay.send(&bot).is_ok());
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_relay_reports_mailer_failure() {
        let mailer = FakeMailer {
            fail: true,
            ..Default::default()
        };
        let relay = RelayTransport::new(&mailer, "from@x.dev", "me@x.dev");

        assert_eq!(relay.handle(&valid()), ContactReply::failure("Email send failed."));
        let err = relay.send(&valid()).unwrap_err();
        assert_eq!(err.to_string(), "Email send failed.");
    }

    #[test]
    fn test_endpoint_validates_before_sending() {
        let transport = EndpointTransport::new(closed_url(), Duration::from_secs(1));
        let err = transport
            .send(&ContactSubmission::new("", "a@b.co", "hi"))
            .unwrap_err();
        assert!(matches!(err, ContactError::Invalid(_)));
    }

    #[test]
    fn test_endpoint_unreachable_is_http_error() {
        let transport = EndpointTransport::new(closed_url(), Duration::from_secs(1));
        let err = transport.send(&valid()).unwrap_err();
        assert!(matches!(err, ContactError::Http(_)));
    }

    #[test]
    fn test_endpoint_accepts_ok_reply() {
        let (url, server) = serve_once("200 OK", r#"{"ok":true}"#);
        let transport = EndpointTransport::new(format!("{url}/api/contact"), timeout());
        transport.send(&valid()).unwrap();

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /api/contact"));
        assert!(request.contains(r#""email":"ada@example.com""#));
    }

    #[test]
    fn test_endpoint_surfaces_relay_error() {
        let (url, server) =
            serve_once("400 Bad Request", r#"{"ok":false,"error":"Invalid input."}"#);
        let transport = EndpointTransport::new(url, timeout());
        let err = transport.send(&valid()).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input.");
        server.join().unwrap();
    }

    #[test]
    fn test_resend_mailer_sends_bearer_key() {
        let (url, server) = serve_once("200 OK", r#"{"id":"email-123"}"#);
        let mailer = ResendMailer::new("re_test", timeout()).with_url(format!("{url}/emails"));
        let message = EmailMessage::for_submission(&valid(), "from@x.dev", "me@x.dev");

        assert_eq!(mailer.deliver(&message).unwrap(), "email-123");
        let request = server.join().unwrap();
        assert!(request.starts_with("POST /emails"));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer re_test"));
        assert!(request.contains("Portfolio contact from Ada"));
    }

    #[test]
    fn test_resend_mailer_reports_rejection() {
        let (url, server) = serve_once(
            "403 Forbidden",
            r#"{"statusCode":403,"message":"API key is invalid","name":"validation_error"}"#,
        );
        let mailer = ResendMailer::new("bad", timeout()).with_url(url);
        let message = EmailMessage::for_submission(&valid(), "from@x.dev", "me@x.dev");

        let err = mailer.deliver(&message).unwrap_err();
        assert!(matches!(err, ContactError::Rejected(_)));
        assert!(err.to_string().contains("API key is invalid"));
        server.join().unwrap();
    }

    #[test]
    fn test_missing_api_key() {
        let err = ResendMailer::from_env("FOLIO_TEST_UNSET_RESEND_KEY", Duration::from_secs(1))
            .unwrap_err();
        assert_eq!(err.to_string(), "FOLIO_TEST_UNSET_RESEND_KEY is not configured");
    }
}
