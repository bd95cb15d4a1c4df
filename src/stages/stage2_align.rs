use anyhow::Result;
use tracing::{debug, info, warn};

use super::SentenceJob;
use crate::annotator::Annotator;
use crate::heuristics::{CorrectionTable, LexiconClass, OTHER};
use crate::models::{AnnotatedWord, LinguisticFields, NlpToken, TextGrid};

/// Configuration for Stage 2 alignment
#[derive(Debug, Clone)]
pub struct AlignConfig {
    /// How many tokens past the cursor to search for a word that did not
    /// match; 0 disables resynchronization
    pub resync_window: usize,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self { resync_window: 3 }
    }
}

/// What happened to one word interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordOutcome {
    /// Matched a token, annotator tags kept
    Matched,
    /// Matched a token, tags overridden by the correction table
    Corrected,
    /// Non-speech vocalization
    NonSpeech,
    /// Interjection tagged X / XY
    Other,
    /// Matched after skipping tokens
    Resynchronized,
    /// No token matched
    Unmatched,
    /// Token list exhausted before this word
    MissingAnnotatorData,
}

/// A word that could not be matched to the token under the cursor
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    /// Index into the words tier
    pub word_index: usize,
    pub word: String,
    /// Surface form of the token under the cursor
    pub expected: String,
}

/// Alignment result for one sentence
#[derive(Debug, Clone, Default)]
pub struct SentenceAlignment {
    /// Index into the sentence tier
    pub sentence_index: usize,
    /// Non-punctuation tokens returned by the annotator
    pub tokens: usize,
    /// Tokens dropped by resynchronization
    pub skipped_tokens: usize,
    /// (words-tier index, outcome) for every annotated or rejected word
    pub outcomes: Vec<(usize, WordOutcome)>,
    pub mismatches: Vec<Mismatch>,
}

impl SentenceAlignment {
    pub fn count(&self, outcome: WordOutcome) -> usize {
        self.outcomes.iter().filter(|(_, o)| *o == outcome).count()
    }
}

/// Outcome counts over a whole run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentSummary {
    pub sentences: usize,
    pub annotator_calls: usize,
    pub matched: usize,
    pub corrected: usize,
    pub nonspeech: usize,
    pub other: usize,
    pub resynchronized: usize,
    pub unmatched: usize,
    pub missing_annotator_data: usize,
}

impl AlignmentSummary {
    fn record(&mut self, sentence: &SentenceAlignment) {
        self.sentences += 1;
        for (_, outcome) in &sentence.outcomes {
            let counter = match outcome {
                WordOutcome::Matched => &mut self.matched,
                WordOutcome::Corrected => &mut self.corrected,
                WordOutcome::NonSpeech => &mut self.nonspeech,
                WordOutcome::Other => &mut self.other,
                WordOutcome::Resynchronized => &mut self.resynchronized,
                WordOutcome::Unmatched => &mut self.unmatched,
                WordOutcome::MissingAnnotatorData => &mut self.missing_annotator_data,
            };
            *counter += 1;
        }
    }

    /// Words that received an annotation
    pub fn annotated(&self) -> usize {
        self.matched + self.corrected + self.nonspeech + self.other + self.resynchronized
    }
}

/// Result of Stage 2 alignment
#[derive(Debug)]
pub struct Stage2Result {
    /// Every words-tier interval with its (possibly empty) annotation
    pub words: Vec<AnnotatedWord>,
    pub sentences: Vec<SentenceAlignment>,
    pub summary: AlignmentSummary,
}

/// Execute Stage 2: align annotator tokens with word intervals
///
/// For each prepared sentence, the words nested in its span are walked in
/// order against the sentence's tokens. Lexicon words never reach the
/// annotator and are tagged directly; everything else is matched by
/// case-insensitive surface form.
pub fn execute_stage2<A: Annotator + ?Sized>(
    grid: &TextGrid,
    jobs: &[SentenceJob],
    annotator: &A,
    table: &CorrectionTable,
    config: &AlignConfig,
) -> Result<Stage2Result> {
    let words_tier = grid.require_tier("words")?;
    let mut words: Vec<AnnotatedWord> = words_tier
        .intervals
        .iter()
        .cloned()
        .map(AnnotatedWord::new)
        .collect();

    let mut sentences = Vec::with_capacity(jobs.len());
    let mut summary = AlignmentSummary::default();

    info!(
        "Stage 2: Aligning {} sentences with {} word intervals",
        jobs.len(),
        words.len()
    );

    for job in jobs {
        let tokens: Vec<NlpToken> = if job.needs_annotation() {
            summary.annotator_calls += 1;
            annotator
                .annotate(&job.filtered_text)?
                .into_iter()
                .filter(|t| !t.is_punct())
                .collect()
        } else {
            Vec::new()
        };

        let alignment = align_sentence(job, &tokens, &mut words, table, config);
        for mismatch in &alignment.mismatches {
            warn!(
                "Sentence {}: word {:?} does not match token {:?}",
                job.index, mismatch.word, mismatch.expected
            );
        }
        let missing = alignment.count(WordOutcome::MissingAnnotatorData);
        if missing > 0 {
            warn!(
                "Sentence {}: {} words left after {} tokens",
                job.index, missing, alignment.tokens
            );
        }

        summary.record(&alignment);
        sentences.push(alignment);
    }

    info!(
        "Stage 2: {} of {} words annotated ({} corrected, {} unmatched)",
        summary.annotated(),
        words_tier.non_empty_count(),
        summary.corrected,
        summary.unmatched
    );

    Ok(Stage2Result {
        words,
        sentences,
        summary,
    })
}

fn align_sentence(
    job: &SentenceJob,
    tokens: &[NlpToken],
    words: &mut [AnnotatedWord],
    table: &CorrectionTable,
    config: &AlignConfig,
) -> SentenceAlignment {
    let sentence = &job.interval;
    let mut alignment = SentenceAlignment {
        sentence_index: job.index,
        tokens: tokens.len(),
        ..Default::default()
    };
    let mut cursor = 0;

    // Words are ordered by start time
    let first = words.partition_point(|w| w.interval.start < sentence.start);

    for index in first..words.len() {
        let word = &words[index].interval;
        if word.start > sentence.end {
            break;
        }
        if word.is_empty() || !sentence.contains(word) {
            continue;
        }

        // A word shared by overlapping sentences keeps its first annotation
        let annotated = words[index].is_annotated();
        let (fields, outcome) = if cursor >= tokens.len() {
            match lexicon_fields(table, &word.text) {
                Some(tagged) => tagged,
                None => (LinguisticFields::default(), WordOutcome::MissingAnnotatorData),
            }
        } else if same_surface(&word.text, &tokens[cursor].text) {
            let matched = token_fields(table, &tokens[cursor]);
            cursor += 1;
            matched
        } else if let Some(tagged) = lexicon_fields(table, &word.text) {
            tagged
        } else if let Some(offset) = resync_offset(&word.text, &tokens[cursor..], config) {
            alignment.skipped_tokens += offset;
            cursor += offset;
            let (fields, _) = token_fields(table, &tokens[cursor]);
            cursor += 1;
            (fields, WordOutcome::Resynchronized)
        } else if annotated {
            (LinguisticFields::default(), WordOutcome::Unmatched)
        } else {
            alignment.mismatches.push(Mismatch {
                word_index: index,
                word: word.text.clone(),
                expected: tokens[cursor].text.clone(),
            });
            (LinguisticFields::default(), WordOutcome::Unmatched)
        };

        if annotated {
            debug!(
                "Sentence {}: word {} already annotated",
                job.index, index
            );
            continue;
        }
        words[index].fields = fields;
        alignment.outcomes.push((index, outcome));
    }

    alignment
}

fn same_surface(word: &str, token: &str) -> bool {
    word.to_lowercase() == token.to_lowercase()
}

/// Tags for words the annotator never sees
fn lexicon_fields(table: &CorrectionTable, word: &str) -> Option<(LinguisticFields, WordOutcome)> {
    match table.classify(word)? {
        LexiconClass::NonSpeech => Some((LinguisticFields::nonspeech(), WordOutcome::NonSpeech)),
        LexiconClass::Other => Some((
            LinguisticFields::forced(OTHER.pos, OTHER.tag),
            WordOutcome::Other,
        )),
    }
}

/// Full record for a matched token, applying tag overrides
fn token_fields(table: &CorrectionTable, token: &NlpToken) -> (LinguisticFields, WordOutcome) {
    match table.override_for(&token.text) {
        Some(forced) if forced.pos != token.pos || forced.tag != token.tag => (
            LinguisticFields::from_token(token, forced.pos, forced.tag),
            WordOutcome::Corrected,
        ),
        _ => (
            LinguisticFields::from_token(token, &token.pos, &token.tag),
            WordOutcome::Matched,
        ),
    }
}

/// Distance to the first token after the cursor matching `word`
fn resync_offset(word: &str, remaining: &[NlpToken], config: &AlignConfig) -> Option<usize> {
    remaining
        .iter()
        .enumerate()
        .skip(1)
        .take(config.resync_window)
        .find(|(_, token)| same_surface(word, &token.text))
        .map(|(offset, _)| offset)
}
