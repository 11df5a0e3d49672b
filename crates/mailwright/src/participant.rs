//! Senders and recipients.

use crate::config::CHARSET;
use mailwright_mime::encoding::encode_rfc2047;
use std::fmt;

/// RFC 5322 specials that force a display name into a quoted string.
const SPECIALS: &str = "()<>[]:;@\\,.\"";

/// A sending or receiving identity: optional display name plus email address.
///
/// The address is not validated; the transport decides what it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    name: Option<String>,
    email: String,
}

impl Participant {
    /// Creates a participant with just an address.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
        }
    }

    /// Creates a participant with a display name and address.
    #[must_use]
    pub fn with_name(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: email.into(),
        }
    }

    /// Returns the display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the part of the address after the first `@`.
    ///
    /// `None` if there is no `@` or nothing follows it.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.email
            .split_once('@')
            .map(|(_, domain)| domain)
            .filter(|domain| !domain.is_empty())
    }

    /// Renders the participant for a header.
    ///
    /// Produces `Name <email>` with the name RFC 2047 encoded as UTF-8 when
    /// needed, or quoted when it contains specials. A missing or blank name,
    /// or one that cannot be encoded, yields the bare address.
    #[must_use]
    pub fn mime_encoded(&self) -> String {
        let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) else {
            return self.email.clone();
        };

        match encode_rfc2047(name, CHARSET) {
            Ok(encoded) if encoded == name && name.contains(|c: char| SPECIALS.contains(c)) => {
                let quoted = name.replace('\\', "\\\\").replace('"', "\\\"");
                format!("\"{quoted}\" <{}>", self.email)
            }
            Ok(encoded) => format!("{encoded} <{}>", self.email),
            Err(e) => {
                tracing::warn!(error = %e, email = %self.email, "Dropping unencodable display name");
                self.email.clone()
            }
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mime_encoded())
    }
}

impl From<&str> for Participant {
    fn from(email: &str) -> Self {
        Self::new(email)
    }
}

impl From<String> for Participant {
    fn from(email: String) -> Self {
        Self::new(email)
    }
}

impl<N: Into<String>, E: Into<String>> From<(N, E)> for Participant {
    fn from((name, email): (N, E)) -> Self {
        Self::with_name(name, email)
    }
}
