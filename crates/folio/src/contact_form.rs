//! Contact form state and background submission.

use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

use folio_config::{ContactConfig, TransportKind};
use folio_contact::{
    ContactError, ContactSubmission, ContactTransport, EndpointTransport, ResendMailer,
    ResendTransport,
};
use tracing::{info, warn};

pub const SENDING_MESSAGE: &str = "Sending…";
pub const SENT_MESSAGE: &str = "Thanks! Your message has been sent.";

/// Build the transport described by the `[contact]` section.
pub fn build_transport(config: &ContactConfig) -> Result<Arc<dyn ContactTransport>, ContactError> {
    let timeout = Duration::from_secs(config.timeout_secs);
    let transport: Arc<dyn ContactTransport> = match config.transport {
        TransportKind::Endpoint => {
            Arc::new(EndpointTransport::new(config.endpoint.clone(), timeout))
        }
        TransportKind::Resend => {
            let to = config
                .to_email
                .clone()
                .ok_or_else(|| ContactError::MissingSetting("contact.to_email".to_string()))?;
            let mailer = ResendMailer::from_env(&config.api_key_env, timeout)?;
            Arc::new(ResendTransport::new(mailer, config.from_email.clone(), to))
        }
    };
    Ok(transport)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Message,
            Field::Message => Field::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Name => Field::Message,
            Field::Email => Field::Name,
            Field::Message => Field::Email,
        }
    }
}

/// Where the last submission stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SendStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed(String),
}

impl SendStatus {
    /// Text shown under the form, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            SendStatus::Idle => None,
            SendStatus::Sending => Some(SENDING_MESSAGE),
            SendStatus::Sent => Some(SENT_MESSAGE),
            SendStatus::Failed(reason) => Some(reason),
        }
    }
}

pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    focus: Option<Field>,
    /// Written by the submit thread.
    status: Arc<RwLock<SendStatus>>,
    /// Last status the form reacted to.
    seen: SendStatus,
    transport: Result<Arc<dyn ContactTransport>, String>,
}

impl std::fmt::Debug for ContactForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactForm")
            .field("focus", &self.focus)
            .field("status", &self.seen)
            .finish_non_exhaustive()
    }
}

impl ContactForm {
    pub fn new(transport: Result<Arc<dyn ContactTransport>, ContactError>) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            focus: None,
            status: Arc::new(RwLock::new(SendStatus::Idle)),
            seen: SendStatus::Idle,
            transport: transport.map_err(|e| e.to_string()),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    pub fn focus(&self) -> Option<Field> {
        self.focus
    }

    pub fn is_focused(&self) -> bool {
        self.focus.is_some()
    }

    pub fn focus_first(&mut self) {
        self.focus = Some(Field::Name);
    }

    pub fn blur(&mut self) {
        self.focus = None;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.map(Field::next);
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.map(Field::prev);
    }

    pub fn insert(&mut self, ch: char) {
        if let Some(field) = self.focus {
            self.value_mut(field).push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focus {
            self.value_mut(field).pop();
        }
    }

    /// `Enter`: advance to the next field, or submit from the last one.
    pub fn enter(&mut self) {
        match self.focus {
            Some(Field::Message) => self.submit(),
            Some(_) => self.focus_next(),
            None => self.focus_first(),
        }
    }

    pub fn status(&self) -> &SendStatus {
        &self.seen
    }

    fn set_status(&mut self, status: SendStatus) {
        if let Ok(mut shared) = self.status.write() {
            *shared = status.clone();
        }
        self.seen = status;
    }

    /// Validate and hand the submission to a background thread.
    pub fn submit(&mut self) {
        if self.seen == SendStatus::Sending {
            return;
        }
        let submission = ContactSubmission::new(
            self.name.trim(),
            self.email.trim(),
            self.message.trim(),
        );
        if let Err(e) = submission.validate() {
            self.set_status(SendStatus::Failed(e.to_string()));
            return;
        }
        let transport = match &self.transport {
            Ok(transport) => Arc::clone(transport),
            Err(reason) => {
                self.set_status(SendStatus::Failed(reason.clone()));
                return;
            }
        };

        self.set_status(SendStatus::Sending);
        let status = Arc::clone(&self.status);
        thread::spawn(move || {
            let outcome = match transport.send(&submission) {
                Ok(()) => {
                    info!("contact message delivered");
                    SendStatus::Sent
                }
                Err(e) => {
                    warn!(error = %e, "contact message failed");
                    SendStatus::Failed(e.to_string())
                }
            };
            if let Ok(mut shared) = status.write() {
                *shared = outcome;
            }
        });
    }

    /// Pick up the outcome of a finished submission. Returns true on change.
    pub fn poll(&mut self) -> bool {
        let current = match self.status.try_read() {
            Ok(status) => status.clone(),
            Err(_) => return false,
        };
        if current == self.seen {
            return false;
        }
        if current == SendStatus::Sent {
            self.name.clear();
            self.email.clear();
            self.message.clear();
            self.focus = None;
        }
        self.seen = current;
        true
    }
}
