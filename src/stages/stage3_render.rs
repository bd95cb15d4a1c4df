use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::io::{TemplateConfig, TextEncoding, tagged_textgrid, write_textgrid_file};
use crate::models::{AnnotatedWord, TextGrid};

/// Result of Stage 3 rendering
#[derive(Debug)]
pub struct Stage3Result {
    pub output_path: PathBuf,
    /// (tier name, non-empty interval count), sorted by tier name
    pub tier_counts: Vec<(String, usize)>,
}

/// Execute Stage 3: write the tagged grid
///
/// The source tiers are copied and one computed tier is added per
/// linguistic field. The file is written in `encoding`, normally the
/// encoding the source was read in.
pub fn execute_stage3(
    grid: &TextGrid,
    words: &[AnnotatedWord],
    output: &Path,
    encoding: TextEncoding,
    config: &TemplateConfig,
) -> Result<Stage3Result> {
    let tagged = tagged_textgrid(grid, words)?;

    info!("Writing tagged TextGrid to {:?}", output);
    write_textgrid_file(output, &tagged, config, encoding)?;

    Ok(Stage3Result {
        output_path: output.to_path_buf(),
        tier_counts: tier_counts(&tagged),
    })
}

/// Non-empty interval count per tier, sorted by tier name
pub fn tier_counts(grid: &TextGrid) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = grid
        .tiers
        .iter()
        .map(|t| (t.name.clone(), t.non_empty_count()))
        .collect();
    counts.sort();
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Interval, LinguisticFields, Tier};

    fn source_grid() -> TextGrid {
        let span = || vec![Interval::new(0.0, 1.0, "")];
        TextGrid {
            xmin: Some(0.0),
            xmax: Some(1.0),
            tiers: vec![
                Tier::new("person", vec![Interval::new(0.0, 1.0, "FORREST")]),
                Tier::new("sentence", vec![Interval::new(0.0, 1.0, "Lauf")]),
                Tier::new("words", vec![Interval::new(0.0, 1.0, "Lauf")]),
                Tier::new("descr", span()),
                Tier::new("phones", span()),
            ],
        }
    }

    #[test]
    fn test_render_counts_tiers() {
        let grid = source_grid();
        let words = vec![AnnotatedWord {
            interval: Interval::new(0.0, 1.0, "Lauf"),
            fields: LinguisticFields::forced("VERB", "VVIMP"),
        }];

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("lauf_tagged.TextGrid");
        let result = execute_stage3(
            &grid,
            &words,
            &output,
            TextEncoding::Utf8,
            &TemplateConfig::default(),
        )
        .unwrap();

        assert!(output.exists());
        assert_eq!(result.tier_counts.len(), 11);
        assert_eq!(result.tier_counts[0], ("dep".to_string(), 0));

        let count = |name: &str| {
            result
                .tier_counts
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, c)| *c)
        };
        assert_eq!(count("pos"), Some(1));
        assert_eq!(count("tag"), Some(1));
        assert_eq!(count("lemma"), Some(0));
        assert_eq!(count("person"), Some(1));
    }

    #[test]
    fn test_missing_source_tier() {
        let mut grid = source_grid();
        grid.tiers.retain(|t| t.name != "phones");

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.TextGrid");
        let error = execute_stage3(
            &grid,
            &[],
            &output,
            TextEncoding::Utf8,
            &TemplateConfig::default(),
        )
        .unwrap_err();

        assert!(error.to_string().contains("phones"));
        assert!(!output.exists());
    }
}
