//! Contact form submissions for the folio portfolio.
//!
//! A submission is `{name, email, message, honeypot}` on the wire and the
//! answer is `{ok, error?}`. Two transports deliver it:
//!
//! - [`EndpointTransport`] posts the submission to a contact relay over HTTP.
//! - [`RelayTransport`] does the relay's job in-process: it screens the
//!   submission and hands an [`EmailMessage`] to a [`Mailer`], such as
//!   [`ResendMailer`].
//!
//! Each transport makes exactly one attempt.

mod email;
mod error;
mod submission;
mod transport;

pub use email::{EmailMessage, escape_html};
pub use error::ContactError;
pub use submission::{ContactReply, ContactSubmission, ValidationError, is_valid_email};
pub use transport::{
    ContactTransport, EndpointTransport, Mailer, RESEND_API_URL, RelayTransport, ResendMailer,
    ResendTransport,
};
