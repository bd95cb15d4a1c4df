pub mod cache;
pub mod client;

pub use cache::*;
pub use client::*;

use anyhow::Result;

use crate::models::NlpToken;

/// External NLP pipeline: tags, parses, lemmatizes and vectorizes a sentence
///
/// Implementations must be deterministic so alignments are reproducible.
pub trait Annotator {
    /// Annotate one sentence, returning its tokens in order
    fn annotate(&self, text: &str) -> Result<Vec<NlpToken>>;
}

impl<T: Annotator + ?Sized> Annotator for &T {
    fn annotate(&self, text: &str) -> Result<Vec<NlpToken>> {
        (**self).annotate(text)
    }
}

/// Remote annotation service queried ahead of alignment
pub trait AnnotationService {
    /// Language model the service annotates with
    fn model(&self) -> &str;

    /// Annotate one sentence, returning its tokens in order
    fn fetch(&self, text: &str) -> impl Future<Output = Result<Vec<NlpToken>>>;
}
