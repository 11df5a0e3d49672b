//! Header construction for outgoing messages.

use crate::clock::{Clock, SystemClock};
use crate::config::CHARSET;
use crate::error::Result;
use crate::message::Message;
use crate::participant::Participant;
use mailwright_mime::encoding::encode_rfc2047;
use mailwright_mime::{Headers, format_rfc5322, is_reserved, validate_header};

/// Computes the header block of a message.
///
/// Headers are recomputed on every call; only `DATE` changes between calls,
/// following the clock.
#[derive(Debug, Clone, Copy)]
pub struct HeaderBuilder<'a, C = SystemClock> {
    message: &'a Message,
    clock: C,
}

impl<'a> HeaderBuilder<'a, SystemClock> {
    /// Creates a builder that dates headers with the system clock.
    #[must_use]
    pub const fn new(message: &'a Message) -> Self {
        Self {
            message,
            clock: SystemClock,
        }
    }
}

impl<'a, C: Clock> HeaderBuilder<'a, C> {
    /// Replaces the clock used for the `DATE` header.
    #[must_use]
    pub fn with_clock<D: Clock>(self, clock: D) -> HeaderBuilder<'a, D> {
        HeaderBuilder {
            message: self.message,
            clock,
        }
    }

    /// Builds the headers.
    ///
    /// Order: `MESSAGE-ID`, `DATE`, `FROM`, `TO`, `CC` (only with cc
    /// recipients), `SUBJECT`, `MIME-VERSION`, then the caller's additional
    /// headers upper-cased. An additional header replaces a generated one of
    /// the same name in place; content-structural names are skipped, as are
    /// names or values that would not fit on one header line. `BCC` is never
    /// emitted.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingDomain`] if the message id cannot be derived.
    pub fn build(&self) -> Result<Headers> {
        let message = self.message;
        let mut headers = Headers::new();

        headers.set("Message-ID", message.message_id()?);
        headers.set("Date", format_rfc5322(&self.clock.now()));
        headers.set("From", message.from().mime_encoded());
        headers.set("To", join(message.to()));
        if !message.cc().is_empty() {
            headers.set("Cc", join(message.cc()));
        }
        headers.set("Subject", encode_subject(message.subject()));
        headers.set("MIME-Version", message.config().mime_version());

        for (name, value) in message.additional_headers() {
            if is_reserved(name) {
                tracing::debug!(header = %name, "Skipping reserved header");
                continue;
            }
            if let Err(e) = validate_header(name, value) {
                tracing::warn!(error = %e, "Skipping malformed header");
                continue;
            }
            headers.set(name, value.as_str());
        }

        Ok(headers)
    }

    /// Builds the headers and renders them as CRLF-joined `NAME: value` lines.
    ///
    /// # Errors
    ///
    /// Same as [`HeaderBuilder::build`].
    pub fn build_string(&self) -> Result<String> {
        Ok(self.build()?.to_string())
    }
}

fn join(participants: &[Participant]) -> String {
    participants
        .iter()
        .map(Participant::mime_encoded)
        .collect::<Vec<_>>()
        .join(", ")
}

fn encode_subject(subject: &str) -> String {
    encode_rfc2047(subject, CHARSET).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Subject could not be encoded, sending it empty");
        String::new()
    })
}

impl Message {
    /// Returns the headers, dated with the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingDomain`] if the message id cannot be derived.
    pub fn headers(&self) -> Result<Headers> {
        HeaderBuilder::new(self).build()
    }

    /// Returns the headers, dated with the given clock.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingDomain`] if the message id cannot be derived.
    pub fn headers_with(&self, clock: impl Clock) -> Result<Headers> {
        HeaderBuilder::new(self).with_clock(clock).build()
    }

    /// Returns the rendered header block, dated with the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingDomain`] if the message id cannot be derived.
    pub fn headers_string(&self) -> Result<String> {
        HeaderBuilder::new(self).build_string()
    }
}
