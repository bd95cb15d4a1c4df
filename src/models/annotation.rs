use serde::{Deserialize, Serialize};

use super::{Interval, NlpToken};

/// Coarse tag forced onto non-speech vocalizations
pub const NONSPEECH: &str = "NONSPEECH";

/// Tiers computed from the NLP annotation, in field order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinguisticTier {
    Pos,
    Tag,
    Dep,
    Lemma,
    Stop,
    Vector,
}

impl LinguisticTier {
    pub const ALL: [LinguisticTier; 6] = [
        LinguisticTier::Pos,
        LinguisticTier::Tag,
        LinguisticTier::Dep,
        LinguisticTier::Lemma,
        LinguisticTier::Stop,
        LinguisticTier::Vector,
    ];

    /// Tier name used in the annotation files
    pub fn name(self) -> &'static str {
        match self {
            LinguisticTier::Pos => "pos",
            LinguisticTier::Tag => "tag",
            LinguisticTier::Dep => "dep",
            LinguisticTier::Lemma => "lemma",
            LinguisticTier::Stop => "stop",
            LinguisticTier::Vector => "vector",
        }
    }
}

/// Linguistic fields attached to a word; each one individually optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinguisticFields {
    pub pos: Option<String>,
    pub tag: Option<String>,
    pub dep: Option<String>,
    pub lemma: Option<String>,
    pub stop: Option<String>,
    pub vector: Option<String>,
}

impl LinguisticFields {
    /// Fields for a non-speech vocalization: coarse tag only
    pub fn nonspeech() -> Self {
        Self {
            pos: Some(NONSPEECH.to_string()),
            ..Default::default()
        }
    }

    /// Fields for a word with a forced coarse/fine tag pair and nothing else
    pub fn forced(pos: &str, tag: &str) -> Self {
        Self {
            pos: Some(pos.to_string()),
            tag: Some(tag.to_string()),
            ..Default::default()
        }
    }

    /// Full annotation from a matched token and the tags to record for it
    pub fn from_token(token: &NlpToken, pos: &str, tag: &str) -> Self {
        Self {
            pos: Some(pos.to_string()),
            tag: Some(tag.to_string()),
            dep: Some(token.dependency_descriptor()),
            lemma: Some(token.lemma.clone()),
            stop: Some(token.stop_field()),
            vector: Some(token.vector_field()),
        }
    }

    pub fn get(&self, tier: LinguisticTier) -> Option<&str> {
        let field = match tier {
            LinguisticTier::Pos => &self.pos,
            LinguisticTier::Tag => &self.tag,
            LinguisticTier::Dep => &self.dep,
            LinguisticTier::Lemma => &self.lemma,
            LinguisticTier::Stop => &self.stop,
            LinguisticTier::Vector => &self.vector,
        };
        field.as_deref()
    }

    /// Number of fields present
    pub fn field_count(&self) -> usize {
        LinguisticTier::ALL
            .into_iter()
            .filter(|&t| self.get(t).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.field_count() == 0
    }
}

/// A words-tier interval with its linguistic annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedWord {
    pub interval: Interval,
    pub fields: LinguisticFields,
}

impl AnnotatedWord {
    pub fn new(interval: Interval) -> Self {
        Self {
            interval,
            fields: LinguisticFields::default(),
        }
    }

    pub fn is_annotated(&self) -> bool {
        !self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::token::token;

    #[test]
    fn test_field_counts() {
        assert_eq!(LinguisticFields::default().field_count(), 0);
        assert_eq!(LinguisticFields::nonspeech().field_count(), 1);
        assert_eq!(LinguisticFields::forced("X", "XY").field_count(), 2);

        let t = token("Forrest", "PROPN", "NE");
        assert_eq!(LinguisticFields::from_token(&t, "PROPN", "NE").field_count(), 6);
    }

    #[test]
    fn test_get_by_tier() {
        let fields = LinguisticFields::forced("X", "XY");
        assert_eq!(fields.get(LinguisticTier::Pos), Some("X"));
        assert_eq!(fields.get(LinguisticTier::Tag), Some("XY"));
        assert_eq!(fields.get(LinguisticTier::Dep), None);
        assert_eq!(fields.get(LinguisticTier::Vector), None);
    }
}
