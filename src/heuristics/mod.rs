pub mod corrections;
pub mod lexicon;

pub use corrections::*;

/// Word lists the correction table is built from
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub proper_nouns: Vec<String>,
    pub nouns: Vec<String>,
    pub numbers: Vec<String>,
    /// Interjections tagged X / XY
    pub other: Vec<String>,
    /// Vocalizations tagged NONSPEECH
    pub nonspeech: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        fn owned(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| w.to_string()).collect()
        }

        Self {
            proper_nouns: owned(lexicon::PROPER_NOUNS),
            nouns: owned(lexicon::NOUNS),
            numbers: owned(lexicon::NUMBERS),
            other: owned(lexicon::OTHER),
            nonspeech: owned(lexicon::NONSPEECH),
        }
    }
}
