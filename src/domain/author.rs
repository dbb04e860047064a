use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::DocumentId;

/// Stable, caller-assigned identifier of an [`Author`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(u64);

impl AuthorId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for AuthorId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The writer of zero or more documents.
///
/// An author keeps a registry of the documents written in its name. The
/// registry holds [`DocumentId`]s rather than documents, so it never keeps a
/// document alive; the documents themselves live in the
/// [`Library`](crate::Library).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    id: AuthorId,
    username: String,
    /// Registered documents, in registration order.
    documents: Vec<DocumentId>,
}

impl Author {
    /// Creates an author with an empty document registry.
    #[must_use]
    pub fn new(id: AuthorId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            documents: Vec::new(),
        }
    }

    /// The author's identifier.
    #[must_use]
    pub const fn id(&self) -> AuthorId {
        self.id
    }

    /// The author's username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Records a document as written by this author.
    ///
    /// This is an unconditional append. Registering the same document twice
    /// records it twice.
    pub fn register_document(&mut self, document: DocumentId) {
        self.documents.push(document);
    }

    /// The number of registrations recorded for this author.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// The registered document ids, in registration order.
    ///
    /// Ids are not re-validated; a document removed from the library after it
    /// was registered is still listed here.
    #[must_use]
    pub fn documents(&self) -> &[DocumentId] {
        &self.documents
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_summary(f, &self.username, self.document_count())
    }
}

/// Writes the one-line description of an author.
pub(crate) fn write_summary(
    f: &mut fmt::Formatter,
    username: &str,
    documents: usize,
) -> fmt::Result {
    write!(f, "Author(username: {username}, documents: {documents})")
}
