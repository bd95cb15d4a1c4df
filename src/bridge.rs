//! Conversion between tagged interval grids and onset-sorted event rows.

use tracing::{info, warn};

use crate::models::{
    BidsRow, Event, EventKey, EventTable, LinguisticTier, PHONEME_MARKER, RowKind, SENTENCE_MARKER,
    TextGrid,
};

/// Rows built from an event table
#[derive(Debug, Clone, Default)]
pub struct BridgeResult {
    pub rows: Vec<BidsRow>,
    /// Events with neither sentence, word nor phoneme text
    pub orphans: Vec<EventKey>,
}

/// Group the non-empty intervals of every tier by exact time span
pub fn event_table(grid: &TextGrid) -> EventTable {
    let mut table = EventTable::default();
    for tier in &grid.tiers {
        for interval in tier.intervals.iter().filter(|i| !i.is_empty()) {
            table.insert(EventKey::of(interval), &tier.name, &interval.text);
        }
    }
    table
}

/// Emit rows in onset order, a parent span before its children
///
/// Word and phoneme rows inherit the person of the most recent sentence row.
pub fn rows_from_events(table: &EventTable) -> BridgeResult {
    let mut result = BridgeResult::default();
    let mut person = String::new();

    for (&key, event) in table.iter() {
        if event.has("sentence") {
            person = event.text("person").to_string();

            let mut row = BidsRow::empty(key);
            row.person = person.clone();
            row.text = event.text("sentence").to_string();
            row.pos = SENTENCE_MARKER.to_string();
            result.rows.push(row);

            if event.has("words") {
                result.rows.push(word_row(key, event, &person));
            }
            if event.has("phones") {
                result.rows.push(phone_row(key, event, &person));
            }
        } else if event.has("words") {
            result.rows.push(word_row(key, event, &person));
            if event.has("phones") {
                result.rows.push(phone_row(key, event, &person));
            }
        } else if event.has("phones") && event.entries.len() == 1 {
            result.rows.push(phone_row(key, event, &person));
        } else {
            warn!(
                "Skipping event at {} ({} s) with tiers {:?}",
                key.onset(),
                key.duration(),
                event.tier_names().collect::<Vec<_>>()
            );
            result.orphans.push(key);
        }
    }

    info!(
        "Converted {} events to {} rows ({} skipped)",
        table.len(),
        result.rows.len(),
        result.orphans.len()
    );

    result
}

/// Convenience for [`event_table`] followed by [`rows_from_events`]
pub fn grid_to_rows(grid: &TextGrid) -> BridgeResult {
    rows_from_events(&event_table(grid))
}

/// Rebuild the event table from rows
///
/// Sentence rows restore `sentence` and `person`, word rows `words`, `descr`
/// and the linguistic tiers, phoneme rows `phones`. Empty cells are left out,
/// as the forward direction never produces events for blank intervals.
pub fn events_from_rows(rows: &[BidsRow]) -> EventTable {
    let mut table = EventTable::default();

    for row in rows {
        let mut put = |tier: &str, text: &str| {
            if !text.is_empty() {
                table.insert(row.key, tier, text);
            }
        };

        match row.kind() {
            RowKind::Sentence => {
                put("sentence", &row.text);
                put("person", &row.person);
            }
            RowKind::Word => {
                put("words", &row.text);
                put("descr", &row.descr);
                for tier in LinguisticTier::ALL {
                    put(tier.name(), row.column(tier.name()).unwrap_or(""));
                }
            }
            RowKind::Phoneme => put("phones", &row.text),
        }
    }

    table
}

fn word_row(key: EventKey, event: &Event, person: &str) -> BidsRow {
    let mut row = BidsRow::empty(key);
    row.person = person.to_string();
    row.text = event.text("words").to_string();
    row.pos = event.text("pos").to_string();
    row.tag = event.text("tag").to_string();
    row.dep = event.text("dep").to_string();
    row.lemma = event.text("lemma").to_string();
    row.stop = event.text("stop").to_string();
    row.descr = event.text("descr").to_string();
    row.vector = event.text("vector").to_string();
    row
}

fn phone_row(key: EventKey, event: &Event, person: &str) -> BidsRow {
    let mut row = BidsRow::empty(key);
    row.person = person.to_string();
    row.text = event.text("phones").to_string();
    row.pos = PHONEME_MARKER.to_string();
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Interval, Tier};

    fn tagged_grid() -> TextGrid {
        TextGrid {
            xmin: Some(0.0),
            xmax: Some(20.0),
            tiers: vec![
                Tier::new(
                    "person",
                    vec![
                        Interval::new(0.0, 10.0, ""),
                        Interval::new(10.0, 15.0, "FORREST"),
                        Interval::new(15.0, 20.0, "JENNY"),
                    ],
                ),
                Tier::new(
                    "sentence",
                    vec![
                        Interval::new(0.0, 10.0, ""),
                        Interval::new(10.0, 15.0, "Lauf, Jenny!"),
                        Interval::new(15.0, 20.0, "Hm"),
                    ],
                ),
                Tier::new(
                    "words",
                    vec![
                        Interval::new(10.0, 12.0, "Lauf"),
                        Interval::new(12.0, 15.0, "Jenny"),
                        Interval::new(15.0, 20.0, "Hm"),
                    ],
                ),
                Tier::new(
                    "pos",
                    vec![
                        Interval::new(10.0, 12.0, "VERB"),
                        Interval::new(12.0, 15.0, "PROPN"),
                        Interval::new(15.0, 20.0, "NONSPEECH"),
                    ],
                ),
                Tier::new(
                    "descr",
                    vec![
                        Interval::new(5.0, 7.0, "Forrest rennt"),
                        Interval::new(12.0, 15.0, "Jenny winkt"),
                    ],
                ),
                Tier::new(
                    "phones",
                    vec![
                        Interval::new(10.0, 11.0, "l"),
                        Interval::new(11.0, 12.0, "auf"),
                        Interval::new(15.0, 20.0, "hm"),
                    ],
                ),
            ],
        }
    }

    #[test]
    fn test_rows_in_onset_order() {
        let result = grid_to_rows(&tagged_grid());

        let summary: Vec<(f64, f64, RowKind, &str)> = result
            .rows
            .iter()
            .map(|r| (r.key.onset(), r.key.duration(), r.kind(), r.text.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (10.0, 5.0, RowKind::Sentence, "Lauf, Jenny!"),
                (10.0, 2.0, RowKind::Word, "Lauf"),
                (10.0, 1.0, RowKind::Phoneme, "l"),
                (11.0, 1.0, RowKind::Phoneme, "auf"),
                (12.0, 3.0, RowKind::Word, "Jenny"),
                (15.0, 5.0, RowKind::Sentence, "Hm"),
                (15.0, 5.0, RowKind::Word, "Hm"),
                (15.0, 5.0, RowKind::Phoneme, "hm"),
            ]
        );

        // The descr-only span is skipped
        assert_eq!(result.orphans, vec![EventKey::from_seconds(5.0, 2.0)]);
    }

    #[test]
    fn test_person_and_columns() {
        let result = grid_to_rows(&tagged_grid());

        let jenny = &result.rows[4];
        assert_eq!(jenny.person, "FORREST");
        assert_eq!(jenny.pos, "PROPN");
        assert_eq!(jenny.descr, "Jenny winkt");
        assert_eq!(jenny.tag, "");

        let hm = &result.rows[6];
        assert_eq!(hm.person, "JENNY");
        assert_eq!(hm.pos, "NONSPEECH");
        assert_eq!(result.rows[7].person, "JENNY");
    }

    #[test]
    fn test_word_before_any_sentence() {
        let grid = TextGrid {
            xmin: Some(0.0),
            xmax: Some(2.0),
            tiers: vec![Tier::new("words", vec![Interval::new(0.5, 1.0, "so")])],
        };
        let result = grid_to_rows(&grid);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].person, "");
        assert_eq!(result.rows[0].kind(), RowKind::Word);
    }

    #[test]
    fn test_inverse_reproduces_rows() {
        let forward = grid_to_rows(&tagged_grid());
        let rebuilt = events_from_rows(&forward.rows);
        let again = rows_from_events(&rebuilt);

        assert_eq!(again.rows, forward.rows);
        assert!(again.orphans.is_empty());
    }
}
