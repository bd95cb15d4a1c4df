use std::path::{Path, PathBuf};

use anyhow::Result;

use super::encoding::{TextEncoding, write_text_file};
use crate::models::{AnnotatedWord, Interval, LinguisticTier, TextGrid, Tier, format_seconds};

/// A tier slot in the tagged output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTier {
    Source(&'static str),
    Linguistic(LinguisticTier),
}

impl OutputTier {
    pub fn name(self) -> &'static str {
        match self {
            OutputTier::Source(name) => name,
            OutputTier::Linguistic(tier) => tier.name(),
        }
    }
}

/// Tier order of a tagged file: computed tiers interleaved after `words`
/// and before `phones`
pub const TAGGED_TIER_ORDER: [OutputTier; 11] = [
    OutputTier::Source("person"),
    OutputTier::Source("sentence"),
    OutputTier::Source("words"),
    OutputTier::Linguistic(LinguisticTier::Pos),
    OutputTier::Linguistic(LinguisticTier::Tag),
    OutputTier::Linguistic(LinguisticTier::Dep),
    OutputTier::Linguistic(LinguisticTier::Lemma),
    OutputTier::Linguistic(LinguisticTier::Stop),
    OutputTier::Source("descr"),
    OutputTier::Linguistic(LinguisticTier::Vector),
    OutputTier::Source("phones"),
];

/// Fallback bounds when the source file declares none
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    pub xmin: f64,
    /// Length of the stimulus' research cut in seconds
    pub xmax: f64,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            xmin: 0.0,
            xmax: 7085.28,
        }
    }
}

/// Build the tagged grid: source tiers plus one computed tier per linguistic
/// field, each computed interval timed like its word and blank when the word
/// carries no such field
pub fn tagged_textgrid(
    grid: &TextGrid,
    words: &[AnnotatedWord],
) -> crate::error::Result<TextGrid> {
    let words_tier = grid.require_tier("words")?;

    let mut tiers = Vec::with_capacity(TAGGED_TIER_ORDER.len());
    for slot in TAGGED_TIER_ORDER {
        let tier = match slot {
            OutputTier::Source(name) => grid.require_tier(name)?.clone(),
            OutputTier::Linguistic(field) => Tier {
                name: field.name().to_string(),
                xmin: words_tier.xmin,
                xmax: words_tier.xmax,
                intervals: words
                    .iter()
                    .map(|w| {
                        Interval::new(
                            w.interval.start,
                            w.interval.end,
                            w.fields.get(field).unwrap_or(""),
                        )
                    })
                    .collect(),
            },
        };
        tiers.push(tier);
    }

    Ok(TextGrid {
        xmin: grid.xmin,
        xmax: grid.xmax,
        tiers,
    })
}

/// Serialize a grid in the long TextGrid format
pub fn format_textgrid(grid: &TextGrid, config: &TemplateConfig) -> String {
    let xmin = grid.xmin.unwrap_or(config.xmin);
    let xmax = grid.xmax.unwrap_or(config.xmax);

    let mut out = String::new();
    out.push_str("File type = \"ooTextFile\"\n");
    out.push_str("Object class = \"TextGrid\"\n");
    out.push('\n');
    out.push_str(&format!("xmin = {}\n", format_seconds(xmin)));
    out.push_str(&format!("xmax = {}\n", format_seconds(xmax)));
    out.push_str("tiers? <exists>\n");
    out.push_str(&format!("size = {}\n", grid.tiers.len()));
    out.push_str("item []:\n");

    for (nr, tier) in grid.tiers.iter().enumerate() {
        out.push_str(&format!("    item [{}]:\n", nr + 1));
        out.push_str("        class = \"IntervalTier\"\n");
        out.push_str(&format!("        name = \"{}\"\n", escape(&tier.name)));
        let tier_xmin = format_seconds(tier.xmin.unwrap_or(xmin));
        let tier_xmax = format_seconds(tier.xmax.unwrap_or(xmax));
        out.push_str(&format!("        xmin = {}\n", tier_xmin));
        out.push_str(&format!("        xmax = {}\n", tier_xmax));
        out.push_str(&format!(
            "        intervals: size = {}\n",
            tier.intervals.len()
        ));

        for (i, interval) in tier.intervals.iter().enumerate() {
            let start = format_seconds(interval.start);
            let end = format_seconds(interval.end);
            out.push_str(&format!("        intervals [{}]:\n", i + 1));
            out.push_str(&format!("            xmin = {}\n", start));
            out.push_str(&format!("            xmax = {}\n", end));
            out.push_str(&format!(
                "            text = \"{}\"\n",
                escape(&interval.text)
            ));
        }
    }

    out
}

pub fn write_textgrid_file(
    path: &Path,
    grid: &TextGrid,
    config: &TemplateConfig,
    encoding: TextEncoding,
) -> Result<()> {
    write_text_file(path, &format_textgrid(grid, config), encoding)
}

/// `<dir>/<stem>_tagged.TextGrid` next to the input
pub fn tagged_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}_tagged.TextGrid", stem))
}

fn escape(text: &str) -> String {
    text.replace('"', "\"\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::input::parse_textgrid;
    use crate::models::LinguisticFields;

    fn source_grid() -> TextGrid {
        let words = vec![
            Interval::new(0.0, 1.0, ""),
            Interval::new(1.0, 1.5, "äh"),
            Interval::new(1.5, 2.0, "Jenny"),
        ];
        TextGrid {
            xmin: Some(0.0),
            xmax: Some(2.0),
            tiers: vec![
                Tier::new("person", vec![Interval::new(1.0, 2.0, "FORREST")]),
                Tier::new("sentence", vec![Interval::new(1.0, 2.0, "äh Jenny")]),
                Tier::new("words", words),
                Tier::new("descr", vec![]),
                Tier::new("phones", vec![Interval::new(1.0, 1.5, "E:")]),
            ],
        }
    }

    fn annotated(grid: &TextGrid) -> Vec<AnnotatedWord> {
        let mut words: Vec<AnnotatedWord> = grid
            .tier("words")
            .unwrap()
            .intervals
            .iter()
            .cloned()
            .map(AnnotatedWord::new)
            .collect();
        words[1].fields = LinguisticFields::nonspeech();
        words[2].fields = LinguisticFields {
            pos: Some("PROPN".to_string()),
            tag: Some("NE".to_string()),
            dep: Some("ROOT;JENNY;-".to_string()),
            lemma: Some("Jenny".to_string()),
            stop: Some("False".to_string()),
            vector: Some("#".to_string()),
        };
        words
    }

    #[test]
    fn test_tagged_tier_order() {
        let grid = source_grid();
        let tagged = tagged_textgrid(&grid, &annotated(&grid)).unwrap();
        assert_eq!(
            tagged.tier_names(),
            TAGGED_TIER_ORDER.map(OutputTier::name).to_vec()
        );
        assert_eq!(
            tagged.tier_names(),
            vec![
                "person", "sentence", "words", "pos", "tag", "dep", "lemma", "stop", "descr",
                "vector", "phones"
            ]
        );
    }

    #[test]
    fn test_computed_tiers_follow_word_timing() {
        let grid = source_grid();
        let tagged = tagged_textgrid(&grid, &annotated(&grid)).unwrap();

        let pos = tagged.tier("pos").unwrap();
        let texts: Vec<&str> = pos.intervals.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["", "NONSPEECH", "PROPN"]);

        // A NONSPEECH word has no fine tag
        let tag = tagged.tier("tag").unwrap();
        assert_eq!(tag.intervals[1].text, "");
        assert_eq!(tag.intervals[2].text, "NE");

        let words = grid.tier("words").unwrap();
        for tier in ["pos", "tag", "dep", "lemma", "stop", "vector"] {
            let tier = tagged.tier(tier).unwrap();
            assert_eq!(tier.intervals.len(), words.intervals.len());
            for (computed, word) in tier.intervals.iter().zip(&words.intervals) {
                assert_eq!((computed.start, computed.end), (word.start, word.end));
            }
        }
    }

    #[test]
    fn test_missing_source_tier() {
        let mut grid = source_grid();
        grid.tiers.retain(|t| t.name != "descr");
        let words = annotated(&grid);
        assert_eq!(
            tagged_textgrid(&grid, &words).unwrap_err(),
            crate::error::FormatError::MissingTier("descr".to_string())
        );
    }

    #[test]
    fn test_format_parses_back() {
        let grid = source_grid();
        let tagged = tagged_textgrid(&grid, &annotated(&grid)).unwrap();
        let text = format_textgrid(&tagged, &TemplateConfig::default());

        assert!(text.starts_with("File type = \"ooTextFile\"\n"));
        assert!(text.contains("size = 11\n"));

        let parsed = parse_textgrid(&text).unwrap();
        assert_eq!(parsed.tiers.len(), 11);
        assert_eq!(parsed.tier("dep").unwrap().intervals[2].text, "ROOT;JENNY;-");
        assert_eq!(
            parsed.tier("words").unwrap().intervals,
            grid.tier("words").unwrap().intervals
        );
    }

    #[test]
    fn test_template_fallback_bounds() {
        let grid = TextGrid {
            xmin: None,
            xmax: None,
            tiers: vec![Tier::new("sentence", vec![])],
        };
        let text = format_textgrid(&grid, &TemplateConfig::default());
        assert!(text.contains("\nxmax = 7085.28\n"));
        assert!(text.contains("        xmax = 7085.28\n"));
    }

    #[test]
    fn test_quotes_are_escaped() {
        let grid = TextGrid {
            xmin: Some(0.0),
            xmax: Some(1.0),
            tiers: vec![Tier::new(
                "descr",
                vec![Interval::new(0.0, 1.0, "sagt \"lauf\"")],
            )],
        };
        let text = format_textgrid(&grid, &TemplateConfig::default());
        assert!(text.contains("text = \"sagt \"\"lauf\"\"\""));

        let parsed = parse_textgrid(&text).unwrap();
        assert_eq!(parsed.tiers[0].intervals[0].text, "sagt \"lauf\"");
    }

    #[test]
    fn test_tagged_output_path() {
        let path = tagged_output_path(Path::new("/data/fg_ad_speech.TextGrid"));
        assert_eq!(path, PathBuf::from("/data/fg_ad_speech_tagged.TextGrid"));
    }
}
