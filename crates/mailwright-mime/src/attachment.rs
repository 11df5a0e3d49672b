//! Attachments and alternative body renderings.

use crate::content_type::ContentType;
use crate::encoding::{encode_base64, encode_rfc2047, fold_base64};
use crate::error::Result;
use crate::header::{Headers, is_reserved, validate_header};
use crate::multipart::{Multipart, Part, TransferEncoding};
use std::path::Path;

/// What an attachment carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentKind {
    /// Raw bytes sent as a file.
    Data {
        /// File content.
        bytes: Vec<u8>,
        /// File name shown to the recipient.
        name: String,
        /// Content type of the file.
        content_type: ContentType,
        /// Whether the part is displayed inline rather than as a download.
        inline: bool,
    },
    /// An HTML document, usually the alternative rendering of the text body.
    ///
    /// Sent as `text/html; charset=utf-8`.
    Html {
        /// HTML source.
        content: String,
    },
}

/// A single attachment of an outgoing message.
///
/// An attachment flagged as alternative is not a file for the recipient but
/// another rendering of the message body (typically HTML).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    kind: AttachmentKind,
    content_id: Option<String>,
    headers: Headers,
    related: Vec<Attachment>,
    alternative: bool,
}

impl Attachment {
    fn from_kind(kind: AttachmentKind, alternative: bool) -> Self {
        Self {
            kind,
            content_id: None,
            headers: Headers::new(),
            related: Vec::new(),
            alternative,
        }
    }

    /// Creates a file attachment from in-memory bytes.
    #[must_use]
    pub fn data(bytes: impl Into<Vec<u8>>, name: impl Into<String>, content_type: ContentType) -> Self {
        Self::from_kind(
            AttachmentKind::Data {
                bytes: bytes.into(),
                name: name.into(),
                content_type,
                inline: false,
            },
            false,
        )
    }

    /// Reads a file attachment from disk, guessing its content type from the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map_or_else(|| "attachment".to_string(), |n| n.to_string_lossy().into_owned());
        tracing::trace!(path = %path.display(), size = bytes.len(), "Read attachment");
        Ok(Self::data(bytes, name, ContentType::from_path(path)))
    }

    /// Creates an HTML attachment, optionally flagged as the alternative body.
    #[must_use]
    pub fn html(content: impl Into<String>, alternative: bool) -> Self {
        Self::from_kind(
            AttachmentKind::Html {
                content: content.into(),
            },
            alternative,
        )
    }

    /// Sets the alternative flag.
    #[must_use]
    pub fn with_alternative(mut self, alternative: bool) -> Self {
        self.alternative = alternative;
        self
    }

    /// Marks a file attachment for inline display. No effect on HTML attachments.
    #[must_use]
    pub fn with_inline(mut self, inline: bool) -> Self {
        if let AttachmentKind::Data { inline: flag, .. } = &mut self.kind {
            *flag = inline;
        }
        self
    }

    /// Sets the Content-ID used to reference this attachment from HTML (`cid:`).
    #[must_use]
    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        let id = content_id.into();
        let id = id.trim().trim_start_matches('<').trim_end_matches('>');
        self.content_id = Some(id.to_string());
        self
    }

    /// Adds an extra header to this attachment's part.
    ///
    /// Content-structural headers are derived from the attachment itself
    /// and are ignored here, as are headers that would not fit on one line.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if is_reserved(name) {
            tracing::warn!(header = name, "Ignoring reserved attachment header");
        } else if let Err(e) = validate_header(name, &value) {
            tracing::warn!(error = %e, "Ignoring malformed attachment header");
        } else {
            self.headers.set(name, value);
        }
        self
    }

    /// Adds resources (e.g., inline images) referenced by this attachment.
    #[must_use]
    pub fn with_related(mut self, related: impl IntoIterator<Item = Self>) -> Self {
        self.related.extend(related);
        self
    }

    /// Returns true if this attachment is an alternative body rendering.
    #[must_use]
    pub const fn is_alternative(&self) -> bool {
        self.alternative
    }

    /// Returns what the attachment carries.
    #[must_use]
    pub const fn kind(&self) -> &AttachmentKind {
        &self.kind
    }

    /// Returns the file name for file attachments.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            AttachmentKind::Data { name, .. } => Some(name),
            AttachmentKind::Html { .. } => None,
        }
    }

    /// Returns the Content-ID, without angle brackets.
    #[must_use]
    pub fn content_id(&self) -> Option<&str> {
        self.content_id.as_deref()
    }

    /// Returns the extra headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Returns the related resources.
    #[must_use]
    pub fn related(&self) -> &[Self] {
        &self.related
    }

    /// Returns the content type of the attachment's own part.
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        match &self.kind {
            AttachmentKind::Data {
                content_type, name, ..
            } => content_type
                .clone()
                .with_parameter("name", encode_file_name(name)),
            AttachmentKind::Html { .. } => ContentType::text_html(),
        }
    }

    /// Builds the MIME part for this attachment.
    ///
    /// Attachments with related resources become a `multipart/related` part
    /// whose root is the attachment itself.
    #[must_use]
    pub fn to_part(&self) -> Part {
        let own = self.own_part();
        if self.related.is_empty() {
            return own;
        }

        let mut related = Multipart::related();
        related.push(own);
        for resource in &self.related {
            related.push(resource.to_part());
        }
        related.into_part()
    }

    fn own_part(&self) -> Part {
        let mut headers = Headers::new();
        headers.set("Content-Type", self.content_type().to_string());

        let body = match &self.kind {
            AttachmentKind::Data {
                bytes, name, inline, ..
            } => {
                let disposition = if *inline { "inline" } else { "attachment" };
                headers.set(
                    "Content-Transfer-Encoding",
                    TransferEncoding::Base64.to_string(),
                );
                headers.set(
                    "Content-Disposition",
                    format!("{disposition}; filename=\"{}\"", quote_escape(&encode_file_name(name))),
                );
                fold_base64(&encode_base64(bytes))
            }
            AttachmentKind::Html { content, .. } => {
                let part = Part::text(&self.content_type(), content);
                headers.extend(&part.headers);
                headers.set("Content-Disposition", "inline");
                part.body
            }
        };

        if let Some(id) = &self.content_id {
            headers.set("Content-ID", format!("<{id}>"));
        }
        headers.extend(&self.headers);

        Part::new(headers, body)
    }
}

fn encode_file_name(name: &str) -> String {
    encode_rfc2047(name, "utf-8").unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Could not encode attachment name");
        name.replace(['\r', '\n'], " ")
    })
}

fn quote_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::encoding::decode_base64;

    #[test]
    fn test_html_attachment_flag() {
        let html = Attachment::html("<p>hi</p>", true);
        assert!(html.is_alternative());
        assert!(html.name().is_none());
        assert!(!Attachment::html("<p>hi</p>", false).is_alternative());
    }

    #[test]
    fn test_data_attachment_part() {
        let attachment = Attachment::data(
            b"hello attachment".to_vec(),
            "a.txt",
            ContentType::new("text", "plain"),
        );
        let part = attachment.to_part();

        assert_eq!(
            part.headers.get("Content-Type"),
            Some("text/plain; name=a.txt")
        );
        assert_eq!(part.headers.get("Content-Transfer-Encoding"), Some("base64"));
        assert_eq!(
            part.headers.get("Content-Disposition"),
            Some("attachment; filename=\"a.txt\"")
        );
        let decoded = decode_base64(part.body.trim_end()).unwrap();
        assert_eq!(decoded, b"hello attachment");
    }

    #[test]
    fn test_inline_attachment_with_content_id() {
        let attachment = Attachment::data(vec![0_u8; 4], "logo.png", ContentType::from_path("logo.png"))
            .with_inline(true)
            .with_content_id("<logo@example.com>");
        let part = attachment.to_part();

        assert_eq!(attachment.content_id(), Some("logo@example.com"));
        assert_eq!(part.headers.get("Content-ID"), Some("<logo@example.com>"));
        assert_eq!(
            part.headers.get("Content-Disposition"),
            Some("inline; filename=\"logo.png\"")
        );
    }

    #[test]
    fn test_html_part() {
        let part = Attachment::html("<p>caf\u{e9}</p>", true).to_part();
        assert_eq!(
            part.headers.get("Content-Type"),
            Some("text/html; charset=utf-8")
        );
        assert_eq!(
            part.headers.get("Content-Transfer-Encoding"),
            Some("quoted-printable")
        );
        assert_eq!(part.headers.get("Content-Disposition"), Some("inline"));
        assert_eq!(part.body, "<p>caf=C3=A9</p>");
    }

    #[test]
    fn test_reserved_headers_ignored() {
        let attachment = Attachment::data(vec![1, 2, 3], "x.bin", ContentType::application_octet_stream())
            .with_header("Content-Type", "text/evil")
            .with_header("X-Tag", "kept")
            .with_header("X-Split", "a\r\nBCC: leaked@example.com")
            .with_header("Bad Name", "v");

        assert!(attachment.headers().get("Content-Type").is_none());
        assert_eq!(attachment.headers().len(), 1);
        let part = attachment.to_part();
        assert_eq!(part.headers.get("X-Tag"), Some("kept"));
        assert_eq!(
            part.headers.get("Content-Type"),
            Some("application/octet-stream; name=x.bin")
        );
    }

    #[test]
    fn test_non_ascii_file_name() {
        let attachment = Attachment::data(vec![1], "résumé.pdf", ContentType::from_path("résumé.pdf"));
        let content_type = attachment.content_type();
        assert!(content_type.parameter("name").unwrap().starts_with("=?utf-8?B?"));
    }

    #[test]
    fn test_related_resources() {
        let logo = Attachment::data(vec![9, 9], "logo.png", ContentType::from_path("logo.png"))
            .with_inline(true)
            .with_content_id("logo");
        let html = Attachment::html("<img src=\"cid:logo\">", true).with_related([logo]);

        let part = html.to_part();
        assert!(
            part.headers
                .get("Content-Type")
                .unwrap()
                .starts_with("multipart/related; boundary=")
        );
        assert!(part.body.contains("CONTENT-TYPE: text/html; charset=utf-8"));
        assert!(part.body.contains("CONTENT-ID: <logo>"));
        assert_eq!(html.related().len(), 1);
    }

    #[test]
    fn test_from_file() {
        let dir = std::env::temp_dir().join(format!("mailwright-mime-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("notes.txt");
        std::fs::write(&path, b"remember the milk").unwrap();

        let attachment = Attachment::from_file(&path).unwrap();
        assert_eq!(attachment.name(), Some("notes.txt"));
        assert_eq!(attachment.content_type().essence(), "text/plain");
        assert!(!attachment.is_alternative());

        std::fs::remove_dir_all(&dir).unwrap();
        assert!(Attachment::from_file(dir.join("missing.txt")).is_err());
    }
}
