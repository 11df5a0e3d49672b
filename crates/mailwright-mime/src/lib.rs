//! # mailwright-mime
//!
//! MIME building blocks for outgoing email.
//!
//! ## Features
//!
//! - **Encoding**: Base64, Quoted-Printable, RFC 2047 header encoding
//! - **Dates**: RFC 5322 `Date` header formatting
//! - **Attachments**: file and HTML attachments, alternative body renderings
//! - **Headers**: ordered, case-insensitive header map with `NAME: value` rendering
//! - **Multipart**: mixed, alternative, related bodies with nesting
//!
//! ## Quick Start
//!
//! ### Attachments
//!
//! ```ignore
//! use mailwright_mime::{Attachment, ContentType};
//!
//! let report = Attachment::from_file("report.pdf")?;
//! let html = Attachment::html("<h1>Hello</h1>", true);
//! assert!(html.is_alternative());
//!
//! let part = report.to_part();
//! println!("{part}");
//! ```
//!
//! ### Multipart Bodies
//!
//! ```ignore
//! use mailwright_mime::{ContentType, Multipart, Part};
//!
//! let body = Multipart::alternative()
//!     .part(Part::text(&ContentType::text_plain(), "Plain text version"))
//!     .part(Part::text(&ContentType::text_html(), "<b>HTML version</b>"));
//!
//! println!("{}", body.body());
//! ```
//!
//! ### Encoding
//!
//! ```ignore
//! use mailwright_mime::encoding::{encode_base64, encode_rfc2047};
//!
//! let encoded = encode_base64(b"Hello, World!");
//! let subject = encode_rfc2047("Héllo", "utf-8")?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod attachment;
mod content_type;
mod error;
mod header;
mod multipart;

pub mod date;
pub mod encoding;

pub use attachment::{Attachment, AttachmentKind};
pub use content_type::ContentType;
pub use date::format_rfc5322;
pub use error::{Error, Result};
pub use header::{Headers, RESERVED_HEADERS, is_reserved, validate_header};
pub use multipart::{Multipart, MultipartKind, Part, TransferEncoding};
