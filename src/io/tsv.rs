use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::models::{BIDS_HEADER, BidsRow, EventKey, format_seconds};

/// Serialize rows as a tab-separated events file with header
pub fn format_tsv(rows: &[BidsRow]) -> String {
    let mut out = BIDS_HEADER.join("\t");
    out.push('\n');

    for row in rows {
        let cells = [
            format_seconds(row.key.onset()),
            format_seconds(row.key.duration()),
            clean(&row.person),
            clean(&row.text),
            clean(&row.pos),
            clean(&row.tag),
            clean(&row.dep),
            clean(&row.lemma),
            clean(&row.stop),
            clean(&row.descr),
            clean(&row.vector),
        ];
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }

    out
}

pub fn write_tsv_file(path: &Path, rows: &[BidsRow]) -> Result<()> {
    std::fs::write(path, format_tsv(rows))
        .with_context(|| format!("Failed to write file: {:?}", path))
}

/// Parse a tab-separated events file; columns are located by header name
pub fn parse_tsv(content: &str) -> Result<Vec<BidsRow>> {
    let mut lines = content.lines().enumerate();
    let header: Vec<&str> = match lines.next() {
        Some((_, line)) => line.split('\t').map(str::trim).collect(),
        None => return Ok(vec![]),
    };

    let column = |name: &str| header.iter().position(|h| *h == name);
    let (Some(onset_col), Some(duration_col)) = (column("onset"), column("duration")) else {
        bail!("Events file header lacks onset/duration columns: {:?}", header);
    };
    let text_columns: Vec<(&str, Option<usize>)> = BIDS_HEADER[2..]
        .iter()
        .map(|&name| (name, column(name)))
        .collect();

    let mut rows = Vec::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.split('\t').collect();
        let cell = |col: usize| cells.get(col).copied().unwrap_or("");

        let onset: f64 = cell(onset_col)
            .trim()
            .parse()
            .with_context(|| format!("Line {}: invalid onset {:?}", index + 1, cell(onset_col)))?;
        let duration: f64 = cell(duration_col).trim().parse().with_context(|| {
            format!("Line {}: invalid duration {:?}", index + 1, cell(duration_col))
        })?;

        let mut row = BidsRow::empty(EventKey::from_seconds(onset, duration));
        for (name, col) in &text_columns {
            let value = col.map(cell).unwrap_or("").to_string();
            match *name {
                "person" => row.person = value,
                "text" => row.text = value,
                "pos" => row.pos = value,
                "tag" => row.tag = value,
                "dep" => row.dep = value,
                "lemma" => row.lemma = value,
                "stop" => row.stop = value,
                "descr" => row.descr = value,
                "vector" => row.vector = value,
                _ => {}
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

pub fn parse_tsv_file(path: &Path) -> Result<Vec<BidsRow>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_tsv(&content).with_context(|| format!("Failed to parse events file: {:?}", path))
}

/// The input path with its `.TextGrid` extension replaced by `.tsv`
pub fn tsv_output_path(input: &Path) -> PathBuf {
    input.with_extension("tsv")
}

/// Tabs and line breaks would break the row structure
fn clean(cell: &str) -> String {
    cell.replace(['\t', '\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RowKind, SENTENCE_MARKER};

    fn sentence_row() -> BidsRow {
        let mut row = BidsRow::empty(EventKey::from_seconds(10.0, 5.0));
        row.person = "FORREST".to_string();
        row.text = "Lauf, Forrest!".to_string();
        row.pos = SENTENCE_MARKER.to_string();
        row
    }

    #[test]
    fn test_format_tsv() {
        let text = format_tsv(&[sentence_row()]);
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("onset\tduration\tperson\ttext\tpos\ttag\tdep\tlemma\tstop\tdescr\tvector")
        );
        assert_eq!(
            lines.next(),
            Some("10.0\t5.0\tFORREST\tLauf, Forrest!\tSENTENCE\t\t\t\t\t\t")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_parse_tsv() {
        let text = format_tsv(&[sentence_row()]);
        let rows = parse_tsv(&text).unwrap();

        assert_eq!(rows, vec![sentence_row()]);
        assert_eq!(rows[0].kind(), RowKind::Sentence);
    }

    #[test]
    fn test_parse_short_rows() {
        let content = "onset\tduration\tperson\ttext\tpos\n1.5\t0.25\tDAN\tah\tNONSPEECH\n";
        let rows = parse_tsv(content).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].key, EventKey::new(1500, 250));
        assert_eq!(rows[0].pos, "NONSPEECH");
        assert_eq!(rows[0].vector, "");
    }

    #[test]
    fn test_parse_invalid_onset() {
        let content = "onset\tduration\nsoon\t1.0\n";
        let error = parse_tsv(content).unwrap_err();
        assert!(error.to_string().contains("Line 2"));
    }

    #[test]
    fn test_tabs_in_cells_are_replaced() {
        let mut row = sentence_row();
        row.text = "a\tb".to_string();
        let rows = parse_tsv(&format_tsv(&[row])).unwrap();
        assert_eq!(rows[0].text, "a b");
    }

    #[test]
    fn test_tsv_output_path() {
        assert_eq!(
            tsv_output_path(Path::new("out/fg_ad_speech_tagged.TextGrid")),
            PathBuf::from("out/fg_ad_speech_tagged.tsv")
        );
    }
}
