use serde::{Deserialize, Serialize};

use crate::error::{FormatError, Result};

/// A single (start, end, text) record of a tier, times in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Start time in seconds, rounded to milliseconds
    pub start: f64,
    /// End time in seconds, rounded to milliseconds
    pub end: f64,
    /// Annotation text; empty for silence
    pub text: String,
}

impl Interval {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start: round_ms(start),
            end: round_ms(end),
            text: text.into(),
        }
    }

    /// Whether this interval carries no annotation (silence)
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn start_ms(&self) -> i64 {
        to_ms(self.start)
    }

    pub fn end_ms(&self) -> i64 {
        to_ms(self.end)
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_ms() - self.start_ms()
    }

    /// Whether `other` lies entirely within this interval's span
    pub fn contains(&self, other: &Interval) -> bool {
        other.start >= self.start && other.end <= self.end
    }
}

/// A named, ordered sequence of intervals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    pub name: String,
    /// Tier bounds as declared in the file, if any
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub intervals: Vec<Interval>,
}

impl Tier {
    pub fn new(name: impl Into<String>, intervals: Vec<Interval>) -> Self {
        Self {
            name: name.into(),
            xmin: None,
            xmax: None,
            intervals,
        }
    }

    /// Number of intervals with non-empty text
    pub fn non_empty_count(&self) -> usize {
        self.intervals.iter().filter(|i| !i.is_empty()).count()
    }
}

/// A parsed interval-annotation file: global bounds and tiers in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextGrid {
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub tiers: Vec<Tier>,
}

impl TextGrid {
    /// Get a tier by name
    pub fn tier(&self, name: &str) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.name == name)
    }

    /// Get a tier by name, failing with a format error when it is absent
    pub fn require_tier(&self, name: &str) -> Result<&Tier> {
        self.tier(name)
            .ok_or_else(|| FormatError::MissingTier(name.to_string()))
    }

    pub fn tier_names(&self) -> Vec<&str> {
        self.tiers.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Round seconds to millisecond precision
pub fn round_ms(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}

/// Convert seconds to whole milliseconds
pub fn to_ms(seconds: f64) -> i64 {
    (seconds * 1000.0).round() as i64
}

/// Convert whole milliseconds back to seconds
pub fn from_ms(ms: i64) -> f64 {
    ms as f64 / 1000.0
}

/// Format seconds the way the annotation files store them: shortest decimal,
/// always with a fractional part ("0.0", "12.5", "7085.28")
pub fn format_seconds(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        format!("{:.1}", seconds)
    } else {
        format!("{}", seconds)
    }
}
