//! Authored documents with a prototype clone
//!
//! Authors write documents, documents collect comments, and any document can
//! be cloned under a selective copy policy: the title is derived, the content
//! is copied, the author is shared and the comments are left behind.

pub mod domain;
pub use domain::{
    Author, AuthorId, Comment, Config, Document, DocumentId, Library, LibraryError, NewDocument,
    Prototype,
};

/// The demonstration client that drives a library through a clone and checks
/// the resulting graph.
pub mod scenario;
pub use scenario::{Report, Scenario, VerificationError};
