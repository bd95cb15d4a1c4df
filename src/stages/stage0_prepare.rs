use tracing::debug;

use crate::error::Result;
use crate::heuristics::CorrectionTable;
use crate::models::{Interval, TextGrid};

/// A non-silent sentence and the text to send to the annotator
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceJob {
    /// Index into the sentence tier
    pub index: usize,
    pub interval: Interval,
    /// Sentence text without non-speech and interjection words
    pub filtered_text: String,
}

impl SentenceJob {
    /// Whether anything is left for the annotator
    pub fn needs_annotation(&self) -> bool {
        !self.filtered_text.is_empty()
    }
}

/// Result of Stage 0 preparation
#[derive(Debug, Clone)]
pub struct PreparationResult {
    pub jobs: Vec<SentenceJob>,
    /// Number of silence intervals in the sentence tier
    pub silent_sentences: usize,
}

/// Perform Stage 0: select sentences for annotation
///
/// Silence intervals are dropped. Words the annotator systematically
/// mistags (non-speech vocalizations and interjections) are removed from
/// each sentence's text. Fails when the `sentence` or `words` tier is absent.
pub fn prepare_sentences(grid: &TextGrid, table: &CorrectionTable) -> Result<PreparationResult> {
    let sentences = grid.require_tier("sentence")?;
    grid.require_tier("words")?;

    let mut jobs = Vec::new();
    let mut silent_sentences = 0;

    for (index, interval) in sentences.intervals.iter().enumerate() {
        if interval.is_empty() {
            silent_sentences += 1;
            continue;
        }

        let filtered_text = table.filter_sentence(&interval.text);
        if filtered_text != interval.text {
            debug!(
                "Sentence {}: {:?} -> {:?}",
                index, interval.text, filtered_text
            );
        }

        jobs.push(SentenceJob {
            index,
            interval: interval.clone(),
            filtered_text,
        });
    }

    Ok(PreparationResult {
        jobs,
        silent_sentences,
    })
}
