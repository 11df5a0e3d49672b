//! The outgoing message model.

use crate::alternative::{Resolved, resolve_alternative};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::participant::Participant;
use mailwright_mime::Attachment;
use std::path::Path;
use uuid::Uuid;

/// One outgoing email.
///
/// Built once through [`MessageBuilder`] and immutable afterwards. The
/// alternative rendering is split off the attachment list at build time,
/// and the unique id is generated exactly once.
#[derive(Debug, Clone)]
pub struct Message {
    id: String,
    from: Participant,
    to: Vec<Participant>,
    cc: Vec<Participant>,
    bcc: Vec<Participant>,
    subject: String,
    text: String,
    html: Option<String>,
    attachments: Vec<Attachment>,
    alternative: Option<Attachment>,
    additional_headers: Vec<(String, String)>,
    config: Config,
}

impl Message {
    /// Starts building a message from the given sender.
    #[must_use]
    pub fn builder(from: impl Into<Participant>) -> MessageBuilder {
        MessageBuilder::new(from)
    }

    /// Returns the unique id generated at build time.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the sender.
    #[must_use]
    pub const fn from(&self) -> &Participant {
        &self.from
    }

    /// Returns the `To` recipients in order.
    #[must_use]
    pub fn to(&self) -> &[Participant] {
        &self.to
    }

    /// Returns the `Cc` recipients in order.
    #[must_use]
    pub fn cc(&self) -> &[Participant] {
        &self.cc
    }

    /// Returns the blind-copy recipients. They never appear in headers.
    #[must_use]
    pub fn bcc(&self) -> &[Participant] {
        &self.bcc
    }

    /// Returns the subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the plain-text body.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the HTML body, if one was supplied.
    #[must_use]
    pub fn html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// Returns the attachments, without the alternative rendering.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns the alternative body rendering.
    #[must_use]
    pub const fn alternative(&self) -> Option<&Attachment> {
        self.alternative.as_ref()
    }

    /// Returns the caller-supplied headers, as given.
    #[must_use]
    pub fn additional_headers(&self) -> &[(String, String)] {
        &self.additional_headers
    }

    /// Returns the configuration the message was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the product tag.
    #[must_use]
    pub fn product(&self) -> &str {
        self.config.product()
    }

    /// Returns true if the body must be sent as multipart.
    #[must_use]
    pub fn has_attachment(&self) -> bool {
        !self.attachments.is_empty() || self.alternative.is_some()
    }

    /// Returns the sending host, taken from the sender's address.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingDomain`] if the sender's address has no `@`
    /// or nothing after it.
    pub fn hostname(&self) -> Result<&str> {
        self.from
            .domain()
            .ok_or_else(|| Error::MissingDomain(self.from.email().to_string()))
    }

    /// Returns the `Message-ID` value: `<uuid.product@hostname>` (RFC 5322 section 3.6.4).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingDomain`] if the hostname cannot be derived.
    pub fn message_id(&self) -> Result<String> {
        let hostname = self.hostname()?;
        Ok(format!("<{}.{}@{hostname}>", self.id, self.config.product()))
    }

    /// Returns the SMTP envelope for this message.
    ///
    /// Recipients are `to`, then `cc`, then `bcc`, with repeated addresses
    /// (compared case-insensitively) listed once.
    #[must_use]
    pub fn envelope(&self) -> Envelope {
        let mut recipients: Vec<String> = Vec::new();
        for participant in self.to.iter().chain(&self.cc).chain(&self.bcc) {
            let email = participant.email();
            if !recipients.iter().any(|r| r.eq_ignore_ascii_case(email)) {
                recipients.push(email.to_string());
            }
        }

        Envelope {
            sender: self.from.email().to_string(),
            recipients,
        }
    }
}

/// Envelope addresses handed to the transport (`MAIL FROM` / `RCPT TO`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Reverse-path.
    pub sender: String,
    /// Forward-paths, including blind-copy recipients.
    pub recipients: Vec<String>,
}

/// Builder for [`Message`].
///
/// Every field except the sender is optional: recipients default to empty
/// lists, subject and text to empty strings, and there is no HTML body,
/// attachment or extra header unless one is added.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    from: Participant,
    to: Vec<Participant>,
    cc: Vec<Participant>,
    bcc: Vec<Participant>,
    subject: String,
    text: String,
    html: Option<String>,
    attachments: Vec<Attachment>,
    additional_headers: Vec<(String, String)>,
    config: Config,
}

impl MessageBuilder {
    /// Creates a builder for a message from the given sender.
    #[must_use]
    pub fn new(from: impl Into<Participant>) -> Self {
        Self {
            from: from.into(),
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: String::new(),
            text: String::new(),
            html: None,
            attachments: Vec::new(),
            additional_headers: Vec::new(),
            config: Config::default(),
        }
    }

    /// Adds a `To` recipient.
    #[must_use]
    pub fn to(mut self, recipient: impl Into<Participant>) -> Self {
        self.to.push(recipient.into());
        self
    }

    /// Adds several `To` recipients, keeping their order.
    #[must_use]
    pub fn to_all<P: Into<Participant>>(mut self, recipients: impl IntoIterator<Item = P>) -> Self {
        self.to.extend(recipients.into_iter().map(Into::into));
        self
    }

    /// Adds a `Cc` recipient.
    #[must_use]
    pub fn cc(mut self, recipient: impl Into<Participant>) -> Self {
        self.cc.push(recipient.into());
        self
    }

    /// Adds several `Cc` recipients, keeping their order.
    #[must_use]
    pub fn cc_all<P: Into<Participant>>(mut self, recipients: impl IntoIterator<Item = P>) -> Self {
        self.cc.extend(recipients.into_iter().map(Into::into));
        self
    }

    /// Adds a blind-copy recipient.
    #[must_use]
    pub fn bcc(mut self, recipient: impl Into<Participant>) -> Self {
        self.bcc.push(recipient.into());
        self
    }

    /// Adds several blind-copy recipients, keeping their order.
    #[must_use]
    pub fn bcc_all<P: Into<Participant>>(mut self, recipients: impl IntoIterator<Item = P>) -> Self {
        self.bcc.extend(recipients.into_iter().map(Into::into));
        self
    }

    /// Sets the subject.
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the plain-text body.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the HTML body. It replaces any attachment flagged as alternative.
    #[must_use]
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// Adds an attachment.
    #[must_use]
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Adds several attachments, keeping their order.
    #[must_use]
    pub fn attach_all(mut self, attachments: impl IntoIterator<Item = Attachment>) -> Self {
        self.attachments.extend(attachments);
        self
    }

    /// Reads a file from disk and adds it as an attachment.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn attach_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let attachment = Attachment::from_file(path)?;
        Ok(self.attach(attachment))
    }

    /// Adds a free-form header.
    ///
    /// Names are matched case-insensitively; a later header with the same
    /// name wins. Content-structural headers are ignored when headers are
    /// built, and a header named like a generated one replaces it.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_headers.push((name.into(), value.into()));
        self
    }

    /// Adds several free-form headers, in order.
    #[must_use]
    pub fn headers<N, V>(mut self, headers: impl IntoIterator<Item = (N, V)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.additional_headers
            .extend(headers.into_iter().map(|(n, v)| (n.into(), v.into())));
        self
    }

    /// Applies a configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Builds the message: resolves the alternative rendering and assigns the id.
    #[must_use]
    pub fn build(self) -> Message {
        let Resolved {
            alternative,
            attachments,
        } = resolve_alternative(self.html.as_deref(), self.attachments);

        let id = Uuid::new_v4().to_string();
        tracing::debug!(
            id = %id,
            attachments = attachments.len(),
            alternative = alternative.is_some(),
            "Built message"
        );

        Message {
            id,
            from: self.from,
            to: self.to,
            cc: self.cc,
            bcc: self.bcc,
            subject: self.subject,
            text: self.text,
            html: self.html,
            attachments,
            alternative,
            additional_headers: self.additional_headers,
            config: self.config,
        }
    }
}
