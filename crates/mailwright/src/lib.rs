//! # mailwright
//!
//! Outbound email messages and their RFC 5322 headers.
//!
//! This crate provides:
//! - An immutable [`Message`] built with [`MessageBuilder`]
//! - [`Participant`] rendering with RFC 2047 display names
//! - Resolution of the alternative (HTML) body against the attachment list
//! - Header construction with a stable order and caller overrides
//! - The SMTP [`Envelope`], including blind-copy recipients
//! - Full message rendering with multipart bodies
//!
//! Connecting to a server and speaking SMTP is left to the transport.
//!
//! ## Example
//!
//! ```ignore
//! use mailwright::{Message, Participant};
//! use mailwright_mime::Attachment;
//!
//! let message = Message::builder(Participant::with_name("Ada", "ada@example.com"))
//!     .to("bob@example.com")
//!     .subject("Minutes")
//!     .text("See attached.")
//!     .html("<p>See attached.</p>")
//!     .attach(Attachment::from_file("minutes.pdf")?)
//!     .header("X-Mailer-Campaign", "weekly")
//!     .build();
//!
//! let headers = message.headers_string()?;
//! let envelope = message.envelope();
//! let data = message.to_rfc5322()?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod alternative;
pub mod clock;
pub mod config;
mod error;
pub mod headers;
pub mod message;
pub mod participant;
pub mod render;

pub use alternative::{Resolved, resolve_alternative};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CHARSET, Config, DEFAULT_PRODUCT};
pub use error::{Error, Result};
pub use headers::HeaderBuilder;
pub use message::{Envelope, Message, MessageBuilder};
pub use participant::Participant;
pub use render::render;

pub use mailwright_mime::{Attachment, ContentType, Headers};
