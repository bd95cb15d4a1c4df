//! Import of the manual speech spreadsheet into a one-tier sentence grid.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use super::encoding::TextEncoding;
use super::output::{TemplateConfig, write_textgrid_file};
use crate::error::FormatError;
use crate::models::{Interval, TextGrid, Tier, from_ms};

/// Video frame length of the time stamps (25 fps)
pub const FRAME_MS: i64 = 40;

const START_COL: usize = 0;
const END_COL: usize = 1;
const TAG_COL: usize = 2;
const COMMENT_COL: usize = 4;
const TEXT_COL: usize = 7;

/// A spoken line with known timing
#[derive(Debug, Clone, PartialEq)]
pub struct VocalRow {
    /// Line number in the spreadsheet
    pub row: usize,
    pub start_ms: i64,
    pub end_ms: i64,
    pub text: String,
}

/// Convert an `HH:MM:SS:FF` stamp to milliseconds
pub fn parse_timestamp(stamp: &str) -> Option<i64> {
    let parts: Vec<i64> = stamp
        .trim()
        .split(':')
        .map(|p| p.parse().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        [hours, minutes, seconds, frames] => {
            Some(((hours * 60 + minutes) * 60 + seconds) * 1000 + frames * FRAME_MS)
        }
        _ => None,
    }
}

/// Split one comma-separated line, honouring double-quoted fields
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Join physical lines into records while a quoted field is open, paired
/// with the 1-based line each record starts on
pub fn csv_records(content: &str) -> Vec<(usize, String)> {
    let mut records = Vec::new();
    let mut open: Option<(usize, String)> = None;

    for (index, line) in content.lines().enumerate() {
        let (row, record) = match open.take() {
            Some((row, mut record)) => {
                record.push('\n');
                record.push_str(line);
                (row, record)
            }
            None => (index + 1, line.to_string()),
        };
        // Escaped quotes come in pairs and keep the parity
        if record.matches('"').count() % 2 == 1 {
            open = Some((row, record));
        } else {
            records.push((row, record));
        }
    }
    records.extend(open);
    records
}

/// Parse the spreadsheet, dropping rows with unknown timing (`#`),
/// soundtrack rows (`OST`) and songs
pub fn parse_vocal_csv(content: &str) -> crate::error::Result<Vec<VocalRow>> {
    let mut rows = Vec::new();

    // First record is the header
    for (row, record) in csv_records(content).into_iter().skip(1) {
        if record.trim().is_empty() {
            continue;
        }
        let cells = split_csv_line(&record);
        if cells.len() <= TEXT_COL {
            return Err(FormatError::MissingColumns {
                row,
                expected: TEXT_COL + 1,
                found: cells.len(),
            });
        }

        if cells[START_COL].contains('#') || cells[END_COL].contains('#') {
            debug!("Row {}: unknown timing, skipped", row);
            continue;
        }
        if cells[TAG_COL].contains("OST") || cells[COMMENT_COL].contains("song") {
            debug!("Row {}: soundtrack or song, skipped", row);
            continue;
        }

        let stamp = |col: usize| {
            parse_timestamp(&cells[col]).ok_or_else(|| FormatError::InvalidTiming {
                row,
                message: format!("invalid time stamp {:?}", cells[col]),
            })
        };
        rows.push(VocalRow {
            row,
            start_ms: stamp(START_COL)?,
            end_ms: stamp(END_COL)?,
            text: cells[TEXT_COL].trim().to_string(),
        });
    }

    Ok(rows)
}

/// Build a `sentence` tier with blank intervals filling every gap up to the
/// stimulus end
pub fn sentence_grid(rows: &[VocalRow], config: &TemplateConfig) -> crate::error::Result<TextGrid> {
    let mut intervals = Vec::with_capacity(rows.len() * 2 + 1);
    let mut last_end_ms = (config.xmin * 1000.0).round() as i64;

    for row in rows {
        if row.start_ms >= row.end_ms {
            return Err(FormatError::InvalidTiming {
                row: row.row,
                message: format!(
                    "start {} is not before end {}",
                    from_ms(row.start_ms),
                    from_ms(row.end_ms)
                ),
            });
        }
        if row.start_ms < last_end_ms {
            return Err(FormatError::InvalidTiming {
                row: row.row,
                message: format!(
                    "start {} overlaps the previous line ending at {}",
                    from_ms(row.start_ms),
                    from_ms(last_end_ms)
                ),
            });
        }

        if row.start_ms > last_end_ms {
            intervals.push(Interval::new(from_ms(last_end_ms), from_ms(row.start_ms), ""));
        }
        intervals.push(Interval::new(
            from_ms(row.start_ms),
            from_ms(row.end_ms),
            row.text.clone(),
        ));
        last_end_ms = row.end_ms;
    }

    let end_ms = (config.xmax * 1000.0).round() as i64;
    if end_ms > last_end_ms {
        intervals.push(Interval::new(from_ms(last_end_ms), from_ms(end_ms), ""));
    }

    let mut tier = Tier::new("sentence", intervals);
    tier.xmin = Some(config.xmin);
    tier.xmax = Some(config.xmax);

    Ok(TextGrid {
        xmin: Some(config.xmin),
        xmax: Some(config.xmax),
        tiers: vec![tier],
    })
}

/// Write the sentence grid as UTF-16, the encoding Praat saves in
pub fn write_sentence_grid_file(
    path: &Path,
    rows: &[VocalRow],
    config: &TemplateConfig,
) -> Result<()> {
    let grid =
        sentence_grid(rows, config).with_context(|| format!("Invalid timing for {:?}", path))?;
    write_textgrid_file(path, &grid, config, TextEncoding::Utf16Le)
}

pub fn parse_vocal_csv_file(path: &Path) -> Result<Vec<VocalRow>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_vocal_csv(&content).with_context(|| format!("Failed to parse speech table: {:?}", path))
}
