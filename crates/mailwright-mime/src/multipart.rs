//! MIME body parts and multipart assembly.

use crate::content_type::ContentType;
use crate::encoding::encode_quoted_printable;
use crate::header::Headers;
use std::fmt;
use uuid::Uuid;

/// Transfer encodings used for generated parts.
///
/// Text is always quoted-printable and binary data always base64, so every
/// part is 7-bit clean on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEncoding {
    /// Base64 encoding.
    Base64,
    /// Quoted-Printable encoding.
    QuotedPrintable,
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base64 => write!(f, "base64"),
            Self::QuotedPrintable => write!(f, "quoted-printable"),
        }
    }
}

/// MIME body part: a header block and an already-encoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// Part headers.
    pub headers: Headers,
    /// Part body, encoded for transfer.
    pub body: String,
}

impl Part {
    /// Creates a new part.
    #[must_use]
    pub const fn new(headers: Headers, body: String) -> Self {
        Self { headers, body }
    }

    /// Creates a quoted-printable text part of the given content type.
    #[must_use]
    pub fn text(content_type: &ContentType, text: &str) -> Self {
        let mut headers = Headers::new();
        headers.set("Content-Type", content_type.to_string());
        headers.set(
            "Content-Transfer-Encoding",
            TransferEncoding::QuotedPrintable.to_string(),
        );
        Self::new(headers, encode_quoted_printable(text))
    }
}

impl fmt::Display for Part {
    /// Renders the header block, a blank line and the body.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\r\n\r\n{}", self.headers, self.body)
    }
}

/// Multipart subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultipartKind {
    /// `multipart/mixed`: a body followed by attachments.
    Mixed,
    /// `multipart/alternative`: renderings of the same content.
    Alternative,
    /// `multipart/related`: a root part and the resources it references.
    Related,
}

/// A multipart body under construction.
#[derive(Debug, Clone)]
pub struct Multipart {
    content_type: ContentType,
    parts: Vec<Part>,
}

impl Multipart {
    /// Creates an empty multipart with a random boundary.
    #[must_use]
    pub fn new(kind: MultipartKind) -> Self {
        Self::with_boundary(kind, generate_boundary())
    }

    /// Creates an empty multipart with a fixed boundary.
    #[must_use]
    pub fn with_boundary(kind: MultipartKind, boundary: impl Into<String>) -> Self {
        let content_type = match kind {
            MultipartKind::Mixed => ContentType::multipart_mixed(boundary),
            MultipartKind::Alternative => ContentType::multipart_alternative(boundary),
            MultipartKind::Related => ContentType::multipart_related(boundary),
        };
        Self {
            content_type,
            parts: Vec::new(),
        }
    }

    /// Creates a `multipart/mixed` body.
    #[must_use]
    pub fn mixed() -> Self {
        Self::new(MultipartKind::Mixed)
    }

    /// Creates a `multipart/alternative` body.
    #[must_use]
    pub fn alternative() -> Self {
        Self::new(MultipartKind::Alternative)
    }

    /// Creates a `multipart/related` body.
    #[must_use]
    pub fn related() -> Self {
        Self::new(MultipartKind::Related)
    }

    /// Appends a part.
    #[must_use]
    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Appends a part in place.
    pub fn push(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Returns the content type, including the boundary parameter.
    #[must_use]
    pub const fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    /// Returns the boundary.
    #[must_use]
    pub fn boundary(&self) -> &str {
        self.content_type.boundary().unwrap_or_default()
    }

    /// Returns the parts added so far.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Renders the body: every part behind a delimiter, then the close delimiter.
    #[must_use]
    pub fn body(&self) -> String {
        let boundary = self.boundary();
        let mut out = String::new();
        for part in &self.parts {
            out.push_str("--");
            out.push_str(boundary);
            out.push_str("\r\n");
            out.push_str(&part.to_string());
            out.push_str("\r\n");
        }
        out.push_str("--");
        out.push_str(boundary);
        out.push_str("--\r\n");
        out
    }

    /// Wraps the multipart into a part so it can be nested in another one.
    #[must_use]
    pub fn into_part(self) -> Part {
        let mut headers = Headers::new();
        headers.set("Content-Type", self.content_type.to_string());
        let body = self.body();
        Part::new(headers, body)
    }
}

fn generate_boundary() -> String {
    format!("=_Part_{}", Uuid::new_v4().simple())
}
