use std::path::Path;

use anyhow::{Context, Result};

use super::encoding::{TextEncoding, read_text_file};
use crate::error::FormatError;
use crate::models::{Interval, TextGrid, Tier, round_ms};

/// Keys of one interval block, in file order
const INTERVAL_KEYS: [&str; 3] = ["xmin", "xmax", "text"];

/// Parse a TextGrid file, returning the grid and the file's encoding
pub fn parse_textgrid_file(path: &Path) -> Result<(TextGrid, TextEncoding)> {
    let (content, encoding) = read_text_file(path)?;
    let grid = parse_textgrid(&content)
        .with_context(|| format!("Failed to parse TextGrid: {:?}", path))?;
    Ok((grid, encoding))
}

/// A tier whose interval fields are still being collected
struct TierBuilder {
    name: String,
    xmin: Option<f64>,
    xmax: Option<f64>,
    /// (line number, key, raw value)
    fields: Vec<(usize, String, String)>,
}

impl TierBuilder {
    fn new(name: String) -> Self {
        Self {
            name,
            xmin: None,
            xmax: None,
            fields: Vec::new(),
        }
    }

    fn finish(self) -> crate::error::Result<Tier> {
        if self.fields.len() % 3 != 0 {
            return Err(FormatError::FieldCount {
                tier: self.name,
                fields: self.fields.len(),
            });
        }

        let mut intervals = Vec::with_capacity(self.fields.len() / 3);
        for (index, group) in self.fields.chunks_exact(3).enumerate() {
            for ((_, key, _), expected) in group.iter().zip(INTERVAL_KEYS) {
                if key != expected {
                    return Err(FormatError::UnexpectedField {
                        tier: self.name.clone(),
                        interval: index + 1,
                        expected,
                        found: key.clone(),
                    });
                }
            }

            let (start_line, _, start) = &group[0];
            let (end_line, _, end) = &group[1];
            let (_, _, text) = &group[2];
            intervals.push(Interval::new(
                parse_time(start, *start_line)?,
                parse_time(end, *end_line)?,
                unquote(text),
            ));
        }

        Ok(Tier {
            name: self.name,
            xmin: self.xmin,
            xmax: self.xmax,
            intervals,
        })
    }
}

/// Parse the long ("ooTextFile") TextGrid format
///
/// Lines are scanned in order: `class = ...` closes the current tier,
/// `name = "..."` opens a new one, `intervals [n]:` starts the interval
/// section, and every `key = value` line inside that section is collected.
/// The collected fields are then grouped into (xmin, xmax, text) triples.
pub fn parse_textgrid(content: &str) -> crate::error::Result<TextGrid> {
    let mut grid = TextGrid::default();
    let mut current: Option<TierBuilder> = None;
    let mut in_intervals = false;

    for (index, raw) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();

        if line.starts_with("class = ") {
            if let Some(tier) = current.take() {
                grid.tiers.push(tier.finish()?);
            }
            in_intervals = false;
        } else if let Some(value) = line.strip_prefix("name = ") {
            if let Some(tier) = current.take() {
                grid.tiers.push(tier.finish()?);
            }
            current = Some(TierBuilder::new(unquote(value)));
            in_intervals = false;
        } else if line.starts_with("intervals [") {
            if current.is_none() {
                return Err(FormatError::OrphanInterval { line: line_no });
            }
            in_intervals = true;
        } else if let Some((key, value)) = line.split_once(" = ") {
            let key = key.trim();
            let value = value.trim();
            match current.as_mut() {
                Some(tier) if in_intervals => {
                    tier.fields
                        .push((line_no, key.to_string(), value.to_string()));
                }
                Some(tier) => match key {
                    "xmin" => tier.xmin = Some(parse_time(value, line_no)?),
                    "xmax" => tier.xmax = Some(parse_time(value, line_no)?),
                    _ => {}
                },
                None => match key {
                    "xmin" => grid.xmin = Some(parse_time(value, line_no)?),
                    "xmax" => grid.xmax = Some(parse_time(value, line_no)?),
                    _ => {}
                },
            }
        }
    }

    if let Some(tier) = current.take() {
        grid.tiers.push(tier.finish()?);
    }

    Ok(grid)
}

fn parse_time(value: &str, line: usize) -> crate::error::Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map(round_ms)
        .map_err(|_| FormatError::InvalidNumber {
            line,
            value: value.to_string(),
        })
}

/// Strip surrounding quotes and unescape doubled quotes
fn unquote(value: &str) -> String {
    let value = value.trim();
    match value
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => value.to_string(),
    }
}

#[cfg(test)]
pub(crate) const SAMPLE: &str = r#"File type = "ooTextFile"
Object class = "TextGrid"

xmin = 0
xmax = 4.5
tiers? <exists>
size = 2
item []:
    item [1]:
        class = "IntervalTier"
        name = "sentence"
        xmin = 0
        xmax = 4.5
        intervals: size = 3
        intervals [1]:
            xmin = 0
            xmax = 1.0
            text = ""
        intervals [2]:
            xmin = 1.0
            xmax = 2.5004
            text = "Lauf, Forrest!"
        intervals [3]:
            xmin = 2.5004
            xmax = 4.5
            text = ""
    item [2]:
        class = "IntervalTier"
        name = "words"
        xmin = 0
        xmax = 4.5
        intervals: size = 4
        intervals [1]:
            xmin = 0
            xmax = 1.0
            text = ""
        intervals [2]:
            xmin = 1.0
            xmax = 1.6
            text = "Lauf,"
        intervals [3]:
            xmin = 1.6
            xmax = 2.5004
            text = "Forrest!"
        intervals [4]:
            xmin = 2.5004
            xmax = 4.5
            text = ""
"#;
