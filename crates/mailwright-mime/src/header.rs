//! MIME header handling.

use crate::error::{Error, Result};
use std::fmt;

/// Header names owned by the body and attachment serializer.
///
/// Callers cannot set these through free-form headers.
pub const RESERVED_HEADERS: [&str; 3] = [
    "CONTENT-TYPE",
    "CONTENT-DISPOSITION",
    "CONTENT-TRANSFER-ENCODING",
];

/// Returns true if `name` is one of the [`RESERVED_HEADERS`], ignoring case.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED_HEADERS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name.trim()))
}

/// Checks that a caller-supplied header fits on a single `NAME: value` line.
///
/// The name must be non-empty printable ASCII without `:` or whitespace
/// (RFC 5322 section 2.2); the value must not contain CR or LF.
///
/// # Errors
///
/// Returns [`Error::InvalidHeader`] describing the first problem found.
pub fn validate_header(name: &str, value: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidHeader("Empty header name".to_string()));
    }
    if !name.bytes().all(|b| b.is_ascii_graphic() && b != b':') {
        return Err(Error::InvalidHeader(format!("Invalid header name: {name:?}")));
    }
    if value.contains(['\r', '\n']) {
        return Err(Error::InvalidHeader(format!(
            "Line break in value of header {name}"
        )));
    }
    Ok(())
}

/// Ordered collection of email headers.
///
/// Names are stored upper-cased and compared case-insensitively. Each name
/// appears at most once; setting an existing name replaces its value but
/// keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Creates a new empty header collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes a header name to its stored form.
    #[must_use]
    pub fn normalize(name: &str) -> String {
        name.trim().to_uppercase()
    }

    /// Sets a header value, replacing any existing value.
    pub fn set(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        let name = Self::normalize(name.as_ref());
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Gets the value for a header.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = Self::normalize(name);
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the header is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Removes a header, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let name = Self::normalize(name);
        let index = self.entries.iter().position(|(n, _)| *n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns an iterator over all headers in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copies every header of `other` into `self`, later values winning.
    pub fn extend(&mut self, other: &Self) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }
}

impl fmt::Display for Headers {
    /// Renders `NAME: value` lines joined by CRLF, without a trailing CRLF.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str("\r\n")?;
            }
            write!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}
