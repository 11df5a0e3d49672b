//! Full RFC 5322 rendering of a message.

use crate::clock::{Clock, SystemClock};
use crate::config::CHARSET;
use crate::error::Result;
use crate::headers::HeaderBuilder;
use crate::message::Message;
use mailwright_mime::{ContentType, Multipart, Part};

/// Renders the message as it goes over the wire after `DATA`.
///
/// Body layout:
/// - text only: a single `text/plain` part
/// - with an alternative: `multipart/alternative` (text, then the alternative)
/// - with attachments: `multipart/mixed` holding the body above, then each
///   attachment in order
///
/// # Errors
///
/// Returns [`crate::Error::MissingDomain`] if the message id cannot be derived.
pub fn render(message: &Message, clock: impl Clock) -> Result<String> {
    let mut headers = HeaderBuilder::new(message).with_clock(clock).build()?;
    let top = body_part(message);
    headers.extend(&top.headers);

    let mut out = format!("{headers}\r\n\r\n{}", top.body);
    if !out.ends_with("\r\n") {
        out.push_str("\r\n");
    }

    tracing::trace!(id = message.id(), size = out.len(), "Rendered message");
    Ok(out)
}

fn body_part(message: &Message) -> Part {
    let text_type = ContentType::new("text", "plain").with_parameter("charset", CHARSET);
    let text = Part::text(&text_type, message.text());

    let body = match message.alternative() {
        Some(alternative) => Multipart::alternative()
            .part(text)
            .part(alternative.to_part())
            .into_part(),
        None => text,
    };

    if message.attachments().is_empty() {
        return body;
    }

    let mut mixed = Multipart::mixed().part(body);
    for attachment in message.attachments() {
        mixed.push(attachment.to_part());
    }
    mixed.into_part()
}

impl Message {
    /// Renders the full message, dated with the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingDomain`] if the message id cannot be derived.
    pub fn to_rfc5322(&self) -> Result<String> {
        render(self, SystemClock)
    }

    /// Renders the full message, dated with the given clock.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingDomain`] if the message id cannot be derived.
    pub fn to_rfc5322_with(&self, clock: impl Clock) -> Result<String> {
        render(self, clock)
    }
}
