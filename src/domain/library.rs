//! In-memory store of authors and documents
//!
//! The [`Library`] owns every [`Author`] and every [`Document`]. Relationships
//! between them are stored as identifiers, never as owning references:
//!
//! - a document refers to its author by [`AuthorId`]
//! - an author lists its documents by [`DocumentId`]
//!
//! Removing either side therefore never keeps the other alive, and a lookup
//! through a stale identifier simply finds nothing. Author ids are retired on
//! removal and never handed out again, so a stale handle stays stale.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::domain::{Author, AuthorId, Comment, Document, DocumentId, NewDocument, Prototype};

/// Errors that can occur when modifying a [`Library`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The referenced author is not in the library.
    #[error("author {0} not found")]
    AuthorNotFound(AuthorId),
    /// The referenced document is not in the library.
    #[error("document {0} not found")]
    DocumentNotFound(DocumentId),
    /// An author with the same id already exists.
    #[error("an author with id {0} already exists")]
    DuplicateAuthor(AuthorId),
    /// The id belonged to an author that has been removed.
    #[error("author id {0} belonged to a removed author and cannot be reused")]
    RetiredAuthor(AuthorId),
}

/// An in-memory arena of authors and documents.
#[derive(Debug, Default)]
pub struct Library {
    /// Authors, keyed by id.
    authors: BTreeMap<AuthorId, Author>,

    /// Ids of removed authors. Documents may still hold these as handles.
    retired: BTreeSet<AuthorId>,

    /// Documents, keyed by id.
    documents: HashMap<DocumentId, Document>,

    /// Document ids in creation order.
    order: Vec<DocumentId>,
}

impl Library {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new author with an empty document registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateAuthor`] if an author with this id already
    /// exists, or [`Error::RetiredAuthor`] if the id belonged to an author
    /// that has since been removed.
    #[instrument(level = "debug", skip(self, username))]
    pub fn add_author(
        &mut self,
        id: AuthorId,
        username: impl Into<String>,
    ) -> Result<AuthorId, Error> {
        if self.authors.contains_key(&id) {
            return Err(Error::DuplicateAuthor(id));
        }
        if self.retired.contains(&id) {
            return Err(Error::RetiredAuthor(id));
        }

        let author = Author::new(id, username);
        debug!(%id, username = author.username(), "added author");
        self.authors.insert(id, author);
        Ok(id)
    }

    /// Constructs a document and stores it.
    ///
    /// If the request names an author, the new document is registered with
    /// that author before this method returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthorNotFound`] if the requested author is not in the
    /// library.
    #[instrument(level = "debug", skip(self, request), fields(title = request.title()))]
    pub fn create_document(&mut self, request: NewDocument) -> Result<DocumentId, Error> {
        let id = DocumentId::new();

        if let Some(author_id) = request.author {
            let author = self
                .authors
                .get_mut(&author_id)
                .ok_or(Error::AuthorNotFound(author_id))?;
            author.register_document(id);
            debug!(
                %id,
                author = %author_id,
                count = author.document_count(),
                "registered document with author"
            );
        }

        self.documents.insert(id, Document::new(id, request));
        self.order.push(id);
        Ok(id)
    }

    /// Appends a comment to a document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentNotFound`] if the document is not in the
    /// library.
    #[instrument(level = "trace", skip(self, comment))]
    pub fn add_comment(&mut self, document: DocumentId, comment: Comment) -> Result<(), Error> {
        let doc = self
            .documents
            .get_mut(&document)
            .ok_or(Error::DocumentNotFound(document))?;
        doc.add_comment(comment);
        trace!(%document, comments = doc.comments().len(), "added comment");
        Ok(())
    }

    /// Clones a document and stores the copy.
    ///
    /// The copy is described by the document's [`Prototype`] implementation
    /// and then built with [`Library::create_document`], so a shared author
    /// registers the copy exactly as it would any other new document.
    ///
    /// If the original's author has been removed from the library, the copy
    /// is created without an author.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DocumentNotFound`] if the source document is not in
    /// the library.
    #[instrument(level = "debug", skip(self))]
    pub fn clone_document(&mut self, source: DocumentId) -> Result<DocumentId, Error> {
        let mut draft = self
            .documents
            .get(&source)
            .ok_or(Error::DocumentNotFound(source))?
            .prototype();

        if let Some(author) = draft
            .author
            .filter(|author| !self.authors.contains_key(author))
        {
            debug!(%source, %author, "author no longer exists, cloning without author");
            draft.author = None;
        }

        let id = self.create_document(draft)?;
        debug!(%source, clone = %id, "cloned document");
        Ok(id)
    }

    /// Removes an author from the library.
    ///
    /// Documents written by this author are unaffected, but their author
    /// handle will no longer resolve. The id is retired: it can not be given
    /// to a new author.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_author(&mut self, id: AuthorId) -> Option<Author> {
        let removed = self.authors.remove(&id)?;
        self.retired.insert(id);
        debug!(%id, "removed author");
        Some(removed)
    }

    /// Removes a document (and its comments) from the library.
    ///
    /// The author's registry is not updated.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_document(&mut self, id: DocumentId) -> Option<Document> {
        let removed = self.documents.remove(&id)?;
        self.order.retain(|existing| *existing != id);
        debug!(%id, "removed document");
        Some(removed)
    }

    /// Retrieves an author by id.
    #[must_use]
    pub fn author(&self, id: AuthorId) -> Option<&Author> {
        self.authors.get(&id)
    }

    /// Retrieves a document by id.
    #[must_use]
    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    /// Resolves the author of a document.
    ///
    /// Returns `None` if the document does not exist, has no author, or its
    /// author has been removed.
    #[must_use]
    pub fn author_of(&self, document: DocumentId) -> Option<&Author> {
        let author = self.documents.get(&document)?.author()?;
        self.authors.get(&author)
    }

    /// Iterates over the documents registered with an author that still
    /// exist, in registration order.
    ///
    /// A document registered more than once is yielded once per
    /// registration.
    pub fn documents_by(&self, author: AuthorId) -> impl Iterator<Item = &Document> + '_ {
        self.authors
            .get(&author)
            .map(Author::documents)
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.documents.get(id))
    }

    /// Iterates over all authors, ordered by id.
    pub fn authors(&self) -> impl Iterator<Item = &Author> + '_ {
        self.authors.values()
    }

    /// Iterates over all documents, in creation order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> + '_ {
        self.order.iter().filter_map(|id| self.documents.get(id))
    }

    /// The number of documents in the library.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the library holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
