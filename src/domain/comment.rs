// Comment - an immutable, timestamped message attached to a document.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A message left on a document.
///
/// Comments are plain values. They are owned by exactly one
/// [`Document`](crate::Document) and are never shared between documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    message: String,
    created: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment, stamped with the current time.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created: Utc::now(),
        }
    }

    /// The text of the comment.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// When the comment was written.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }
}
