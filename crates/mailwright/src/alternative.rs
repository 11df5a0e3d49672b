//! Choosing the alternative body rendering of a message.

use mailwright_mime::Attachment;

/// Outcome of [`resolve_alternative`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The alternative rendering, if any.
    pub alternative: Option<Attachment>,
    /// The remaining attachments, in their original order.
    pub attachments: Vec<Attachment>,
}

/// Splits the alternative rendering off a list of attachments.
///
/// With `html` present, a fresh alternative is built from it and every
/// attachment flagged as alternative is dropped. Without it, the last
/// flagged attachment becomes the alternative and is removed from the list.
#[must_use]
pub fn resolve_alternative(html: Option<&str>, attachments: Vec<Attachment>) -> Resolved {
    if let Some(html) = html {
        let before = attachments.len();
        let attachments: Vec<Attachment> = attachments
            .into_iter()
            .filter(|attachment| !attachment.is_alternative())
            .collect();

        let dropped = before - attachments.len();
        if dropped > 0 {
            tracing::debug!(dropped, "HTML body overrides alternative attachments");
        }

        return Resolved {
            alternative: Some(Attachment::html(html, true)),
            attachments,
        };
    }

    let mut attachments = attachments;
    let winner = attachments.iter().rposition(Attachment::is_alternative);
    let alternative = winner.map(|index| attachments.remove(index));

    Resolved {
        alternative,
        attachments,
    }
}
