//! Descriptive statistics over a tabular events file.

use std::collections::BTreeMap;

use crate::models::{BidsRow, NONSPEECH, RowKind};

/// Rows printed for the sentence and non-speech tables
pub const TOP_SPEAKERS: usize = 12;

/// Word columns summarized by category
pub const WORD_COLUMNS: [&str; 5] = ["person", "pos", "tag", "dep", "descr"];

/// Start times of the stimulus segments (fMRI runs), closed by the end of
/// the movie
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    pub starts: Vec<f64>,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            starts: vec![
                0.0, 886.0, 1752.08, 2612.16, 3572.2, 4480.28, 5342.36, 6410.44, 7086.0,
            ],
        }
    }
}

impl SegmentConfig {
    pub fn segment_count(&self) -> usize {
        self.starts.len().saturating_sub(1)
    }

    /// 1-based segment containing `onset`; `None` outside the stimulus
    pub fn segment_of(&self, onset: f64) -> Option<usize> {
        let run = self.starts.iter().rposition(|&start| onset >= start)?;
        (run < self.segment_count()).then_some(run + 1)
    }
}

/// Per-category counts; column 0 is the whole stimulus, 1.. the segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountTable {
    columns: usize,
    counts: BTreeMap<String, Vec<usize>>,
}

impl CountTable {
    fn new(segments: usize) -> Self {
        Self {
            columns: segments + 1,
            counts: BTreeMap::new(),
        }
    }

    fn add(&mut self, category: &str, segment: Option<usize>) {
        let columns = self.columns;
        let counts = self
            .counts
            .entry(category.to_string())
            .or_insert_with(|| vec![0; columns]);
        counts[0] += 1;
        if let Some(segment) = segment.filter(|&s| s < columns) {
            counts[segment] += 1;
        }
    }

    /// Counts for one category, or `None` if it never occurred
    pub fn get(&self, category: &str) -> Option<&[usize]> {
        self.counts.get(category).map(Vec::as_slice)
    }

    pub fn total(&self) -> usize {
        self.counts.values().map(|c| c[0]).sum()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Categories by total count, most frequent first
    pub fn ranked(&self) -> Vec<(&str, &[usize])> {
        let mut ranked: Vec<(&str, &[usize])> = self
            .counts
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
            .collect();
        ranked.sort_by(|a, b| b.1[0].cmp(&a.1[0]).then(a.0.cmp(b.0)));
        ranked
    }
}

/// Counts of sentences, non-speech, phonemes and word categories
#[derive(Debug, Clone)]
pub struct DescriptiveStats {
    /// Sentences per person
    pub sentences: CountTable,
    /// NONSPEECH words per person
    pub nonspeech: CountTable,
    /// Occurrences per phoneme
    pub phonemes: CountTable,
    /// Word rows
    pub words: usize,
    /// Category counts per word column, in [`WORD_COLUMNS`] order
    pub word_columns: Vec<(&'static str, CountTable)>,
}

impl DescriptiveStats {
    pub fn from_rows(rows: &[BidsRow], config: &SegmentConfig) -> Self {
        let segments = config.segment_count();
        let mut stats = Self {
            sentences: CountTable::new(segments),
            nonspeech: CountTable::new(segments),
            phonemes: CountTable::new(segments),
            words: 0,
            word_columns: WORD_COLUMNS
                .iter()
                .map(|&c| (c, CountTable::new(segments)))
                .collect(),
        };

        for row in rows {
            let segment = config.segment_of(row.onset());
            match row.kind() {
                RowKind::Sentence => stats.sentences.add(&row.person, segment),
                RowKind::Phoneme => stats.phonemes.add(&row.text, segment),
                RowKind::Word => {
                    if row.pos == NONSPEECH {
                        stats.nonspeech.add(&row.person, segment);
                    }
                    stats.words += 1;
                    for (column, table) in stats.word_columns.iter_mut() {
                        let value = category(*column, row);
                        if !value.is_empty() {
                            table.add(value, segment);
                        }
                    }
                }
            }
        }

        stats
    }

    /// Tab-separated report
    pub fn render(&self) -> String {
        let mut out = String::new();
        render_table(&mut out, "Sentences:", &self.sentences, Some(TOP_SPEAKERS));
        render_table(&mut out, "Non-Speech:", &self.nonspeech, Some(TOP_SPEAKERS));
        render_table(&mut out, "Phonemes:", &self.phonemes, None);

        out.push_str(&format!("Words:\t{}\n", self.words));
        for (column, table) in &self.word_columns {
            out.push('\n');
            out.push_str(&format!("{}\n", column));
            for (name, counts) in table.ranked() {
                out.push_str(&format!("{}\t{}\n", name, join_counts(counts)));
            }
        }

        out
    }
}

/// Category of a word row in one column; dependency and description cells
/// are reduced to their first `;`-separated part
fn category<'a>(column: &str, row: &'a BidsRow) -> &'a str {
    let cell = row.column(column).unwrap_or("");
    match column {
        "dep" | "descr" => cell.split(';').next().unwrap_or(""),
        _ => cell,
    }
}

fn render_table(out: &mut String, title: &str, table: &CountTable, top: Option<usize>) {
    out.push_str(&format!("{}\t{}\n", title, table.total()));
    let ranked = table.ranked();
    let shown = top.unwrap_or(ranked.len()).min(ranked.len());
    for (name, counts) in &ranked[..shown] {
        out.push_str(&format!("{}\t{}\n", name, join_counts(counts)));
    }
    out.push('\n');
}

fn join_counts(counts: &[usize]) -> String {
    counts
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join("\t")
}
