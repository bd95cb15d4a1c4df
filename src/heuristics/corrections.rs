use std::collections::{HashMap, HashSet};

use super::Lexicon;
use super::lexicon::PUNCTUATION_SUFFIXES;

/// Coarse/fine tag pair forced onto a word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedTags {
    pub pos: &'static str,
    pub tag: &'static str,
}

pub const PROPER_NOUN: ForcedTags = ForcedTags { pos: "PROPN", tag: "NE" };
pub const NOUN: ForcedTags = ForcedTags { pos: "NOUN", tag: "NN" };
pub const NUMBER: ForcedTags = ForcedTags { pos: "NUM", tag: "CARD" };
pub const OTHER: ForcedTags = ForcedTags { pos: "X", tag: "XY" };

/// Lexicon class of a word that is kept away from the annotator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexiconClass {
    NonSpeech,
    Other,
}

/// Immutable lookup tables built once per run from a [`Lexicon`]
///
/// Every entry is stored lowercased together with its variants carrying a
/// trailing '.', ',' or '!'. Lookups lowercase their input.
#[derive(Debug, Clone)]
pub struct CorrectionTable {
    overrides: HashMap<String, ForcedTags>,
    other: HashSet<String>,
    nonspeech: HashSet<String>,
}

impl CorrectionTable {
    pub fn new(lexicon: &Lexicon) -> Self {
        let mut overrides = HashMap::new();
        // Earlier lists take precedence
        for (words, tags) in [
            (&lexicon.proper_nouns, PROPER_NOUN),
            (&lexicon.nouns, NOUN),
            (&lexicon.numbers, NUMBER),
        ] {
            for variant in words.iter().flat_map(|w| with_punctuation(w)) {
                overrides.entry(variant).or_insert(tags);
            }
        }

        Self {
            overrides,
            other: lexicon.other.iter().flat_map(|w| with_punctuation(w)).collect(),
            nonspeech: lexicon
                .nonspeech
                .iter()
                .flat_map(|w| with_punctuation(w))
                .collect(),
        }
    }

    /// Tags to force onto a matched token, if its surface form is listed
    pub fn override_for(&self, surface: &str) -> Option<ForcedTags> {
        self.overrides.get(&surface.to_lowercase()).copied()
    }

    /// Whether the word is a non-speech vocalization or an appeal interjection
    pub fn classify(&self, word: &str) -> Option<LexiconClass> {
        let word = word.to_lowercase();
        if self.nonspeech.contains(&word) {
            Some(LexiconClass::NonSpeech)
        } else if self.other.contains(&word) {
            Some(LexiconClass::Other)
        } else {
            None
        }
    }

    /// Sentence text with all lexicon-class words removed
    pub fn filter_sentence(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|word| self.classify(word).is_none())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for CorrectionTable {
    fn default() -> Self {
        Self::new(&Lexicon::default())
    }
}

fn with_punctuation(word: &str) -> Vec<String> {
    let word = word.to_lowercase();
    let mut variants: Vec<String> = PUNCTUATION_SUFFIXES
        .iter()
        .map(|suffix| format!("{}{}", word, suffix))
        .collect();
    variants.push(word);
    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_is_case_insensitive() {
        let table = CorrectionTable::default();
        assert_eq!(table.override_for("Flame"), Some(PROPER_NOUN));
        assert_eq!(table.override_for("FORREST"), Some(PROPER_NOUN));
        assert_eq!(table.override_for("Shrimps"), Some(NOUN));
        assert_eq!(table.override_for("hundertsechzig"), Some(NUMBER));
        assert_eq!(table.override_for("happens"), None);
        assert_eq!(table.override_for("laufen"), None);
    }

    #[test]
    fn test_punctuation_variants() {
        let table = CorrectionTable::default();
        assert_eq!(table.override_for("Jenny!"), Some(PROPER_NOUN));
        assert_eq!(table.override_for("Jenny,"), Some(PROPER_NOUN));
        assert_eq!(table.classify("äh,"), Some(LexiconClass::NonSpeech));
        assert_eq!(table.classify("Hallo!"), Some(LexiconClass::Other));
        assert_eq!(table.classify("Jenny?"), None);
    }

    #[test]
    fn test_filter_sentence() {
        let table = CorrectionTable::default();
        assert_eq!(
            table.filter_sentence("Hey äh Forrest, lauf!"),
            "Forrest, lauf!"
        );
        assert_eq!(table.filter_sentence("ähm, hm."), "");
    }

    #[test]
    fn test_custom_lexicon() {
        let lexicon = Lexicon {
            proper_nouns: vec!["Gump".to_string()],
            nouns: vec!["gump".to_string()],
            numbers: vec![],
            other: vec![],
            nonspeech: vec!["brr".to_string()],
        };
        let table = CorrectionTable::new(&lexicon);

        // The proper-noun list wins over the noun list
        assert_eq!(table.override_for("gump."), Some(PROPER_NOUN));
        assert_eq!(table.classify("Brr"), Some(LexiconClass::NonSpeech));
        assert_eq!(table.classify("äh"), None);
    }
}
