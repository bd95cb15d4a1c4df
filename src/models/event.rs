use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Interval, from_ms, to_ms};

/// Marker in the `pos` column of a sentence row
pub const SENTENCE_MARKER: &str = "SENTENCE";
/// Marker in the `pos` column of a phoneme row
pub const PHONEME_MARKER: &str = "PHONEME";

/// Column names of the tabular (BIDS) events file
pub const BIDS_HEADER: [&str; 11] = [
    "onset", "duration", "person", "text", "pos", "tag", "dep", "lemma", "stop", "descr", "vector",
];

/// Exact time span shared by co-located intervals, in milliseconds
///
/// Keys order by onset ascending, then by duration descending, so a parent
/// span sorts before the child spans that start with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventKey {
    pub onset_ms: i64,
    pub duration_ms: i64,
}

impl EventKey {
    pub fn new(onset_ms: i64, duration_ms: i64) -> Self {
        Self {
            onset_ms,
            duration_ms,
        }
    }

    pub fn from_seconds(onset: f64, duration: f64) -> Self {
        Self::new(to_ms(onset), to_ms(duration))
    }

    pub fn of(interval: &Interval) -> Self {
        Self::new(interval.start_ms(), interval.duration_ms())
    }

    pub fn onset(&self) -> f64 {
        from_ms(self.onset_ms)
    }

    pub fn duration(&self) -> f64 {
        from_ms(self.duration_ms)
    }
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.onset_ms
            .cmp(&other.onset_ms)
            .then(other.duration_ms.cmp(&self.duration_ms))
    }
}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Tier texts that share one exact time span
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Tier name -> interval text
    pub entries: BTreeMap<String, String>,
}

impl Event {
    pub fn has(&self, tier: &str) -> bool {
        self.entries.contains_key(tier)
    }

    pub fn get(&self, tier: &str) -> Option<&str> {
        self.entries.get(tier).map(String::as_str)
    }

    /// Text for a tier, empty when the tier has no interval at this span
    pub fn text(&self, tier: &str) -> &str {
        self.get(tier).unwrap_or("")
    }

    pub fn tier_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Onset-keyed event table, iterated in emission order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventTable {
    pub events: BTreeMap<EventKey, Event>,
}

impl EventTable {
    pub fn insert(&mut self, key: EventKey, tier: &str, text: &str) {
        self.events
            .entry(key)
            .or_default()
            .entries
            .insert(tier.to_string(), text.to_string());
    }

    pub fn get(&self, key: &EventKey) -> Option<&Event> {
        self.events.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EventKey, &Event)> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Classification of a tabular row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Sentence,
    Word,
    Phoneme,
}

/// One row of the tabular events file
#[derive(Debug, Clone, PartialEq)]
pub struct BidsRow {
    pub key: EventKey,
    pub person: String,
    pub text: String,
    pub pos: String,
    pub tag: String,
    pub dep: String,
    pub lemma: String,
    pub stop: String,
    pub descr: String,
    pub vector: String,
}

impl BidsRow {
    /// Row with the given span and all other columns empty
    pub fn empty(key: EventKey) -> Self {
        Self {
            key,
            person: String::new(),
            text: String::new(),
            pos: String::new(),
            tag: String::new(),
            dep: String::new(),
            lemma: String::new(),
            stop: String::new(),
            descr: String::new(),
            vector: String::new(),
        }
    }

    pub fn kind(&self) -> RowKind {
        match self.pos.as_str() {
            SENTENCE_MARKER => RowKind::Sentence,
            PHONEME_MARKER => RowKind::Phoneme,
            _ => RowKind::Word,
        }
    }

    pub fn onset(&self) -> f64 {
        self.key.onset()
    }

    /// Cell value by column name
    pub fn column(&self, name: &str) -> Option<&str> {
        let value = match name {
            "person" => &self.person,
            "text" => &self.text,
            "pos" => &self.pos,
            "tag" => &self.tag,
            "dep" => &self.dep,
            "lemma" => &self.lemma,
            "stop" => &self.stop,
            "descr" => &self.descr,
            "vector" => &self.vector,
            _ => return None,
        };
        Some(value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_span_sorts_first() {
        let sentence = EventKey::from_seconds(10.0, 5.0);
        let word = EventKey::from_seconds(10.0, 2.0);
        let later = EventKey::from_seconds(10.5, 0.5);

        let mut keys = vec![later, word, sentence];
        keys.sort();

        assert_eq!(keys, vec![sentence, word, later]);
    }

    #[test]
    fn test_event_table_groups_by_span() {
        let mut table = EventTable::default();
        let key = EventKey::of(&Interval::new(1.0, 1.4, "Lauf"));
        table.insert(key, "sentence", "Lauf");
        table.insert(key, "words", "Lauf");
        table.insert(EventKey::from_seconds(1.0, 0.1), "phones", "l");

        assert_eq!(table.len(), 2);
        let event = table.get(&key).unwrap();
        assert!(event.has("sentence"));
        assert_eq!(event.text("words"), "Lauf");
        assert_eq!(event.text("pos"), "");
    }

    #[test]
    fn test_row_kind() {
        let mut row = BidsRow::empty(EventKey::new(0, 100));
        row.pos = SENTENCE_MARKER.to_string();
        assert_eq!(row.kind(), RowKind::Sentence);
        row.pos = PHONEME_MARKER.to_string();
        assert_eq!(row.kind(), RowKind::Phoneme);
        row.pos = "NONSPEECH".to_string();
        assert_eq!(row.kind(), RowKind::Word);
    }
}
