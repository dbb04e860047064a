//! Runs the prototype scenario and checks the resulting object graph.
//!
//! A [`Scenario`] creates an author and a document, comments on the document,
//! clones it, comments on each clone, and summarises the result in a
//! [`Report`]. The report can then be [verified](Report::verify) against the
//! clone policy.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::domain::{
    Author, AuthorId, Comment, Config, Document, DocumentId, Library, LibraryError, NewDocument,
    author, document::{self, derived_title},
};

/// Errors that can occur while running a scenario.
#[derive(Debug, Error)]
pub enum Error {
    /// The library rejected an operation.
    #[error(transparent)]
    Library(#[from] LibraryError),
}

/// A property of the cloned graph that did not hold.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// Creating the original did not register it with its author.
    #[error("expected {expected} registered document(s) after construction, found {actual}")]
    NotRegistered {
        /// Expected registry size.
        expected: usize,
        /// Actual registry size.
        actual: usize,
    },
    /// The original's comments changed while it was cloned, or while its
    /// clones were commented on.
    #[error("original should have {expected} comment(s), found {actual}")]
    OriginalChanged {
        /// Comments added to the original.
        expected: usize,
        /// Comments found on the original.
        actual: usize,
    },
    /// A clone carries comments.
    #[error("clone '{title}' should have no comments, found {comments}")]
    CommentsCopied {
        /// Title of the offending clone.
        title: String,
        /// Comments found on the clone.
        comments: usize,
    },
    /// A clone's title is not derived from the original's.
    #[error("clone title should be \"{expected}\", found \"{actual}\"")]
    TitleNotDerived {
        /// The derived title.
        expected: String,
        /// The clone's title.
        actual: String,
    },
    /// A clone's content differs from the original's.
    #[error("clone '{title}' content differs from the original")]
    ContentDiverged {
        /// Title of the offending clone.
        title: String,
    },
    /// A clone does not share the original's author.
    #[error("clone '{title}' does not share the original's author")]
    AuthorNotShared {
        /// Title of the offending clone.
        title: String,
    },
    /// Commenting on a clone did not add exactly one comment to that clone.
    #[error("clone '{title}' should have {expected} comment(s) after being commented on, found {actual}")]
    CloneNotIndependent {
        /// Title of the offending clone.
        title: String,
        /// Comments added to the clone.
        expected: usize,
        /// Comments found on the clone.
        actual: usize,
    },
    /// Cloning did not register each clone with the author.
    #[error("expected {expected} registered document(s) after cloning, found {actual}")]
    CloneNotRegistered {
        /// Expected registry size.
        expected: usize,
        /// Actual registry size.
        actual: usize,
    },
}

/// Summary of an author, as observed at the end of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    /// The author's id.
    pub id: AuthorId,
    /// The author's username.
    pub username: String,
    /// Number of registered documents.
    pub documents: usize,
}

impl From<&Author> for AuthorSummary {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id(),
            username: author.username().to_string(),
            documents: author.document_count(),
        }
    }
}

impl fmt::Display for AuthorSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        author::write_summary(f, &self.username, self.documents)
    }
}

/// Summary of a document, as observed at the end of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    /// The document's id.
    pub id: DocumentId,
    /// The document's title.
    pub title: String,
    /// The document's content.
    pub content: String,
    /// Fingerprint of the content.
    pub fingerprint: String,
    /// The resolved author, if the handle is still valid.
    pub author: Option<AuthorId>,
    /// The comments on the document.
    pub comments: Vec<Comment>,
}

impl DocumentSummary {
    fn new(library: &Library, document: &Document) -> Self {
        Self {
            id: document.id(),
            title: document.title().to_string(),
            content: document.content().to_string(),
            fingerprint: document.fingerprint(),
            author: library.author_of(document.id()).map(Author::id),
            comments: document.comments().to_vec(),
        }
    }
}

impl fmt::Display for DocumentSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        document::write_summary(f, &self.title, self.comments.len())
    }
}

/// The observable outcome of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// The author, after cloning.
    pub author: AuthorSummary,
    /// The author's registry size right after the original was created.
    pub registered_before_cloning: usize,
    /// The number of comments added to the original.
    pub comments_added: usize,
    /// The original document, after cloning and after its clones were
    /// commented on.
    pub original: DocumentSummary,
    /// Each clone as it was right after cloning, in the order it was made.
    pub clones: Vec<DocumentSummary>,
    /// The comment count of each clone after one comment was added to it.
    pub clone_comments_after_edit: Vec<usize>,
}

impl Report {
    /// Checks the graph against the clone policy.
    ///
    /// # Errors
    ///
    /// Returns the first property that does not hold.
    pub fn verify(&self) -> Result<(), VerificationError> {
        if self.registered_before_cloning != 1 {
            return Err(VerificationError::NotRegistered {
                expected: 1,
                actual: self.registered_before_cloning,
            });
        }

        if self.original.comments.len() != self.comments_added {
            return Err(VerificationError::OriginalChanged {
                expected: self.comments_added,
                actual: self.original.comments.len(),
            });
        }

        let expected_title = derived_title(&self.original.title);
        for clone in &self.clones {
            if !clone.comments.is_empty() {
                return Err(VerificationError::CommentsCopied {
                    title: clone.title.clone(),
                    comments: clone.comments.len(),
                });
            }
            if clone.title != expected_title {
                return Err(VerificationError::TitleNotDerived {
                    expected: expected_title,
                    actual: clone.title.clone(),
                });
            }
            if clone.content != self.original.content
                || clone.fingerprint != self.original.fingerprint
            {
                return Err(VerificationError::ContentDiverged {
                    title: clone.title.clone(),
                });
            }
            if clone.author != self.original.author {
                return Err(VerificationError::AuthorNotShared {
                    title: clone.title.clone(),
                });
            }
        }

        for (clone, &actual) in self.clones.iter().zip(&self.clone_comments_after_edit) {
            if actual != 1 {
                return Err(VerificationError::CloneNotIndependent {
                    title: clone.title.clone(),
                    expected: 1,
                    actual,
                });
            }
        }

        let expected = self.registered_before_cloning + self.clones.len();
        if self.author.documents != expected {
            return Err(VerificationError::CloneNotRegistered {
                expected,
                actual: self.author.documents,
            });
        }

        Ok(())
    }
}

/// The comment left on every clone once it has been made.
const CLONE_COMMENT: &str = "Commented on the copy";

/// Drives a [`Library`] through the prototype scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    config: Config,
}

impl Scenario {
    /// Creates a scenario from its configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Overrides the number of clones.
    #[must_use]
    pub fn with_clones(mut self, clones: usize) -> Self {
        self.config.clones = clones;
        self
    }

    /// Runs the scenario against a fresh library.
    ///
    /// # Errors
    ///
    /// Returns an error if the library rejects one of the operations.
    pub fn run(&self) -> Result<Report, Error> {
        let mut library = Library::new();
        self.run_in(&mut library)
    }

    /// Runs the scenario against an existing library.
    ///
    /// # Errors
    ///
    /// Returns an error if the library rejects one of the operations, for
    /// example if the configured author id is already taken.
    #[instrument(level = "debug", skip_all, fields(title = %self.config.title, clones = self.config.clones))]
    pub fn run_in(&self, library: &mut Library) -> Result<Report, Error> {
        let config = &self.config;

        let author = library.add_author(config.author_id, config.username.as_str())?;
        let original = library.create_document(NewDocument::new(
            config.title.as_str(),
            config.content.as_str(),
            Some(author),
        ))?;
        let registered_before_cloning = registered(library, author);

        for message in &config.comments {
            library.add_comment(original, Comment::new(message.as_str()))?;
        }

        let clones = (0..config.clones)
            .map(|_| library.clone_document(original))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = clones.len(), "cloned original");

        let clone_summaries = clones
            .iter()
            .map(|&id| summarise(library, id))
            .collect::<Result<Vec<_>, _>>()?;

        for &clone in &clones {
            library.add_comment(clone, Comment::new(CLONE_COMMENT))?;
        }
        let clone_comments_after_edit = clones
            .iter()
            .map(|&id| summarise(library, id).map(|summary| summary.comments.len()))
            .collect::<Result<Vec<_>, _>>()?;

        let report = Report {
            author: library
                .author(author)
                .map(AuthorSummary::from)
                .ok_or(LibraryError::AuthorNotFound(author))?,
            registered_before_cloning,
            comments_added: config.comments.len(),
            original: summarise(library, original)?,
            clones: clone_summaries,
            clone_comments_after_edit,
        };

        info!(
            author = %report.author.username,
            documents = report.author.documents,
            "scenario complete"
        );
        Ok(report)
    }
}

fn registered(library: &Library, author: AuthorId) -> usize {
    library.author(author).map_or(0, Author::document_count)
}

fn summarise(library: &Library, id: DocumentId) -> Result<DocumentSummary, LibraryError> {
    library
        .document(id)
        .map(|document| DocumentSummary::new(library, document))
        .ok_or(LibraryError::DocumentNotFound(id))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn default_report() -> Report {
        Scenario::new(Config::default()).run().unwrap()
    }

    #[test]
    fn default_scenario_matches_expected_outcome() {
        let report = default_report();

        assert_eq!(report.original.title, "My Prototype Doc");
        assert_eq!(report.original.comments.len(), 1);
        assert_eq!(report.original.comments[0].message(), "Nice doc!");

        assert_eq!(report.clones.len(), 1);
        let clone = &report.clones[0];
        assert_eq!(clone.title, "Copy of 'My Prototype Doc'");
        assert_eq!(clone.content, "Hello Prototype!");
        assert!(clone.comments.is_empty());
        assert_eq!(clone.author, Some(AuthorId::new(1)));

        assert_eq!(report.author.username, "GabrielEduardo");
        assert_eq!(report.author.documents, 2);
    }

    #[test]
    fn default_scenario_verifies() {
        assert_eq!(default_report().verify(), Ok(()));
    }

    #[test_case(0; "no clones")]
    #[test_case(1; "one clone")]
    #[test_case(4; "several clones")]
    fn every_clone_is_registered(clones: usize) {
        let report = Scenario::new(Config::default())
            .with_clones(clones)
            .run()
            .unwrap();

        assert_eq!(report.author.documents, 1 + clones);
        assert_eq!(report.verify(), Ok(()));
    }

    #[test]
    fn scenario_without_comments_verifies() {
        let config = Config {
            comments: Vec::new(),
            ..Config::default()
        };
        let report = Scenario::new(config).run().unwrap();

        assert!(report.original.comments.is_empty());
        assert_eq!(report.verify(), Ok(()));
    }

    #[test]
    fn taken_author_id_is_an_error() {
        let mut library = Library::new();
        library.add_author(AuthorId::new(1), "someone").unwrap();

        let error = Scenario::new(Config::default())
            .run_in(&mut library)
            .unwrap_err();

        assert!(matches!(
            error,
            Error::Library(LibraryError::DuplicateAuthor(_))
        ));
    }

    #[test]
    fn copied_comments_fail_verification() {
        let mut report = default_report();
        report.clones[0].comments = report.original.comments.clone();

        assert!(matches!(
            report.verify(),
            Err(VerificationError::CommentsCopied { comments: 1, .. })
        ));
    }

    #[test]
    fn verbatim_title_fails_verification() {
        let mut report = default_report();
        report.clones[0].title = report.original.title.clone();

        assert_eq!(
            report.verify(),
            Err(VerificationError::TitleNotDerived {
                expected: "Copy of 'My Prototype Doc'".to_string(),
                actual: "My Prototype Doc".to_string(),
            })
        );
    }

    #[test]
    fn diverged_content_fails_verification() {
        let mut report = default_report();
        report.clones[0].content = "something else".to_string();

        assert!(matches!(
            report.verify(),
            Err(VerificationError::ContentDiverged { .. })
        ));
    }

    #[test]
    fn dropped_author_fails_verification() {
        let mut report = default_report();
        report.clones[0].author = None;

        assert!(matches!(
            report.verify(),
            Err(VerificationError::AuthorNotShared { .. })
        ));
    }

    #[test]
    fn each_clone_only_gets_its_own_comment() {
        let report = Scenario::new(Config::default())
            .with_clones(3)
            .run()
            .unwrap();

        assert_eq!(report.clone_comments_after_edit, [1, 1, 1]);
        assert_eq!(report.original.comments.len(), 1);
        assert!(report.clones.iter().all(|clone| clone.comments.is_empty()));
    }

    #[test]
    fn shared_clone_comments_fail_verification() {
        let mut report = Scenario::new(Config::default())
            .with_clones(2)
            .run()
            .unwrap();
        report.clone_comments_after_edit[1] = 2;

        assert_eq!(
            report.verify(),
            Err(VerificationError::CloneNotIndependent {
                title: "Copy of 'My Prototype Doc'".to_string(),
                expected: 1,
                actual: 2,
            })
        );
    }

    #[test]
    fn clone_comment_leaking_into_original_fails_verification() {
        let mut report = default_report();
        report
            .original
            .comments
            .push(Comment::new("Commented on the copy"));

        assert_eq!(
            report.verify(),
            Err(VerificationError::OriginalChanged {
                expected: 1,
                actual: 2,
            })
        );
    }

    #[test]
    fn missing_registration_fails_verification() {
        let mut report = default_report();
        report.author.documents = 1;

        assert_eq!(
            report.verify(),
            Err(VerificationError::CloneNotRegistered {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn summaries_display_like_their_entities() {
        let report = default_report();

        assert_eq!(
            report.original.to_string(),
            "Document(title: My Prototype Doc, comments: 1)"
        );
        assert_eq!(
            report.clones[0].to_string(),
            "Document(title: Copy of 'My Prototype Doc', comments: 0)"
        );
        assert_eq!(
            report.author.to_string(),
            "Author(username: GabrielEduardo, documents: 2)"
        );
    }

    #[test]
    fn summaries_match_entity_display() {
        let mut library = Library::new();
        let report = Scenario::new(Config::default())
            .run_in(&mut library)
            .unwrap();

        let author = library.author(report.author.id).unwrap();
        let original = library.document(report.original.id).unwrap();

        assert_eq!(report.author.to_string(), author.to_string());
        assert_eq!(report.original.to_string(), original.to_string());
    }

    #[test]
    fn report_serializes_to_json() {
        let json = serde_json::to_value(default_report()).unwrap();

        assert_eq!(json["author"]["documents"], 2);
        assert_eq!(json["clones"][0]["title"], "Copy of 'My Prototype Doc'");
        assert_eq!(json["original"]["comments"][0]["message"], "Nice doc!");
    }
}
