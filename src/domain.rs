//! Domain models for authored documents.
//!
//! This module contains the entities (authors, documents, comments), the
//! arena that owns them, and the scenario configuration.

/// Author entity and its document registry.
pub mod author;
pub use author::{Author, AuthorId};

mod comment;
pub use comment::Comment;

mod config;
pub use config::Config;

/// Document entity and its clone policy.
pub mod document;
pub use document::{Document, DocumentId, NewDocument};

/// Arena owning every author and document.
pub mod library;
pub use library::{Error as LibraryError, Library};

mod prototype;
pub use prototype::Prototype;
