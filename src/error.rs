//! Structural errors in annotation input.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Tier \"{tier}\" has {fields} interval fields, which is not a multiple of 3")]
    FieldCount { tier: String, fields: usize },

    #[error("Tier \"{tier}\", interval {interval}: expected field \"{expected}\", found \"{found}\"")]
    UnexpectedField {
        tier: String,
        interval: usize,
        expected: &'static str,
        found: String,
    },

    #[error("Line {line}: \"{value}\" is not a valid time")]
    InvalidNumber { line: usize, value: String },

    #[error("Line {line}: interval data appears before any tier name")]
    OrphanInterval { line: usize },

    #[error("Missing tier: {0}")]
    MissingTier(String),

    #[error("Row {row}: {message}")]
    InvalidTiming { row: usize, message: String },

    #[error("Row {row}: expected at least {expected} columns, found {found}")]
    MissingColumns {
        row: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, FormatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_count_display() {
        let error = FormatError::FieldCount {
            tier: "words".to_string(),
            fields: 7,
        };
        assert_eq!(
            error.to_string(),
            "Tier \"words\" has 7 interval fields, which is not a multiple of 3"
        );
    }

    #[test]
    fn test_missing_tier_display() {
        let error = FormatError::MissingTier("sentence".to_string());
        assert_eq!(error.to_string(), "Missing tier: sentence");
    }

    #[test]
    fn test_invalid_timing_display() {
        let error = FormatError::InvalidTiming {
            row: 4,
            message: "start 12.0 is not before end 11.0".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Row 4: start 12.0 is not before end 11.0"
        );
    }
}
