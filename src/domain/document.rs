use std::fmt;

use borsh::BorshSerialize;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::{AuthorId, Comment, Prototype};

/// Globally unique, perpetually stable identifier of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn uuid(self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DocumentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A request to construct a [`Document`].
///
/// Requests are turned into documents by
/// [`Library::create_document`](crate::Library::create_document), which is
/// the only construction path. Cloning produces one of these too, see
/// [`Prototype`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) author: Option<AuthorId>,
}

impl NewDocument {
    /// Describes a document with the given title, content and (optional)
    /// author.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: Option<AuthorId>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author,
        }
    }

    /// The requested title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The requested content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The requested author, if any.
    #[must_use]
    pub const fn author(&self) -> Option<AuthorId> {
        self.author
    }
}

/// An authored document.
///
/// A document owns its comments and holds a weak handle to its author: the
/// handle is an [`AuthorId`] that is resolved through the
/// [`Library`](crate::Library), so a document never keeps its author alive.
///
/// Copies are made through [`Prototype`], not [`Clone`].
#[derive(Debug, PartialEq, Eq)]
pub struct Document {
    id: DocumentId,
    title: String,
    content: String,
    author: Option<AuthorId>,
    comments: Vec<Comment>,
    created: DateTime<Utc>,
}

impl Document {
    pub(crate) fn new(id: DocumentId, request: NewDocument) -> Self {
        let NewDocument {
            title,
            content,
            author,
        } = request;

        Self {
            id,
            title,
            content,
            author,
            comments: Vec::new(),
            created: Utc::now(),
        }
    }

    /// The document's identifier.
    #[must_use]
    pub const fn id(&self) -> DocumentId {
        self.id
    }

    /// The document's title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The body of the document.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The handle of the author this document was written by.
    ///
    /// The handle may be stale. Use
    /// [`Library::author_of`](crate::Library::author_of) to resolve it.
    #[must_use]
    pub const fn author(&self) -> Option<AuthorId> {
        self.author
    }

    /// The comments on this document, in the order they were added.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// When the document was created.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Appends a comment.
    ///
    /// There is no validation and no deduplication.
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Returns a value generated by hashing the content of the document.
    ///
    /// Two documents with identical content have identical fingerprints,
    /// regardless of title, author or comments.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        fingerprint(&self.content)
    }
}

/// Calculates the fingerprint of some document content.
///
/// The fingerprint is a SHA256 hash of the Borsh-serialized content.
///
/// # Panics
///
/// Panics if borsh serialization fails (which should never happen for this
/// data structure).
#[must_use]
pub fn fingerprint(content: &str) -> String {
    #[derive(BorshSerialize)]
    struct FingerprintData<'a> {
        content: &'a str,
    }

    // encode using [borsh](https://borsh.io/)
    let encoded = borsh::to_vec(&FingerprintData { content }).expect("this should never fail");

    format!("{:x}", Sha256::digest(encoded))
}

/// The title given to a copy of a document titled `title`.
#[must_use]
pub fn derived_title(title: &str) -> String {
    format!("Copy of '{title}'")
}

impl Prototype for Document {
    type Draft = NewDocument;

    /// Describes a copy of this document.
    ///
    /// - the title is derived from the original (see [`derived_title`])
    /// - the content is copied verbatim
    /// - the author is shared
    /// - comments are not copied; the copy starts with none
    fn prototype(&self) -> NewDocument {
        NewDocument {
            title: derived_title(&self.title),
            content: self.content.clone(),
            author: self.author,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_summary(f, &self.title, self.comments.len())
    }
}

/// Writes the one-line description of a document.
pub(crate) fn write_summary(f: &mut fmt::Formatter, title: &str, comments: usize) -> fmt::Result {
    write!(f, "Document(title: {title}, comments: {comments})")
}
