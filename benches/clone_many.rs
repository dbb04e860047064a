//! This bench test repeatedly clones a heavily commented document, growing the
//! author's registry with every clone.

#![allow(missing_docs)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use folio::{AuthorId, Comment, DocumentId, Library, NewDocument};

/// Creates a library holding one authored document with many comments.
fn preseed_library() -> (Library, DocumentId) {
    let mut library = Library::new();
    let author = library.add_author(AuthorId::new(1), "bench").unwrap();
    let document = library
        .create_document(NewDocument::new(
            "Benchmark",
            "lorem ipsum ".repeat(256),
            Some(author),
        ))
        .unwrap();
    for i in 0..1_000 {
        library
            .add_comment(document, Comment::new(format!("comment {i}")))
            .unwrap();
    }
    (library, document)
}

fn clone_many(c: &mut Criterion) {
    c.bench_function("clone 100 times", |b| {
        b.iter_batched(
            preseed_library,
            |(mut library, document)| {
                for _ in 0..100 {
                    library.clone_document(document).unwrap();
                }
                library
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, clone_many);
criterion_main!(benches);
