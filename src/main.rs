use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use textgrid_tagger::stages::{Stage2Result, Stage3Result};
use textgrid_tagger::{
    AlignConfig, AlignmentSummary, AnnotationCache, CorrectionTable, DescriptiveStats, NlpClient,
    NlpConfig, SegmentConfig, Stage1Config, TemplateConfig, execute_stage1, execute_stage2,
    execute_stage3, grid_to_rows, parse_textgrid_file, parse_tsv_file, parse_vocal_csv_file,
    prepare_sentences, tagged_output_path, tsv_output_path, write_sentence_grid_file,
    write_tsv_file,
};

#[derive(Parser)]
#[command(name = "textgrid-tagger")]
#[command(author, version, about = "Linguistic annotation of TextGrid speech transcripts", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add part-of-speech, dependency, lemma, stop-word and vector tiers
    Tag {
        /// Input TextGrid with person, sentence, words, descr and phones tiers
        textgrid: PathBuf,

        /// Precomputed annotations (JSON); queries NLP_ENDPOINT when absent
        annotations: Option<PathBuf>,

        /// Tokens to look ahead when a word does not match (0 disables)
        #[arg(long, default_value = "3")]
        resync_window: usize,
    },

    /// Fetch annotations for every sentence and store them as JSON
    Annotate {
        /// Input TextGrid
        textgrid: PathBuf,

        /// Output annotations file (JSON)
        annotations: PathBuf,
    },

    /// Convert a tagged TextGrid to a tab-separated events file
    Bids {
        /// Tagged TextGrid
        textgrid: PathBuf,
    },

    /// Print descriptive statistics of an events file
    Stats {
        /// Tab-separated events file
        tsv: PathBuf,
    },

    /// Build a sentence TextGrid from the manual speech spreadsheet
    ImportVocal {
        /// Speech spreadsheet (CSV)
        csv: PathBuf,

        /// Output TextGrid
        textgrid: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Tag {
            textgrid,
            annotations,
            resync_window,
        } => tag_textgrid(&textgrid, annotations.as_deref(), resync_window).await,
        Commands::Annotate {
            textgrid,
            annotations,
        } => annotate_textgrid(&textgrid, &annotations).await,
        Commands::Bids { textgrid } => convert_to_bids(&textgrid),
        Commands::Stats { tsv } => print_stats(&tsv),
        Commands::ImportVocal { csv, textgrid } => import_vocal(&csv, &textgrid),
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

async fn tag_textgrid(
    input: &Path,
    annotations: Option<&Path>,
    resync_window: usize,
) -> Result<()> {
    info!("Loading TextGrid from {:?}", input);
    let (grid, encoding) = parse_textgrid_file(input)?;
    info!("Loaded tiers {:?}", grid.tier_names());

    let table = CorrectionTable::default();

    // Stage 0: Select sentences
    let prepared = prepare_sentences(&grid, &table).context("Input is not annotatable")?;
    info!(
        "Stage 0: {} sentences, {} silent",
        prepared.jobs.len(),
        prepared.silent_sentences
    );

    // Stage 1: Annotations from file or service
    let cache = match annotations {
        Some(path) => {
            info!("Loading annotations from {:?}", path);
            AnnotationCache::from_json_file(path)?
        }
        None => {
            let client = NlpClient::new(NlpConfig::from_env()?);
            execute_stage1(&client, &prepared.jobs, &Stage1Config::default())
                .await?
                .cache
        }
    };

    // Stage 2: Align tokens with words
    let align_config = AlignConfig { resync_window };
    let aligned = execute_stage2(&grid, &prepared.jobs, &cache, &table, &align_config)?;

    // Stage 3: Write the tagged grid
    let output = tagged_output_path(input);
    let rendered = execute_stage3(
        &grid,
        &aligned.words,
        &output,
        encoding,
        &TemplateConfig::default(),
    )?;

    print_tag_report(&aligned, &rendered);
    Ok(())
}

fn print_tag_report(aligned: &Stage2Result, rendered: &Stage3Result) {
    println!("Tagged TextGrid: {}", rendered.output_path.display());
    println!();
    println!("Tiers");
    println!("-----");
    for (name, count) in &rendered.tier_counts {
        println!("{:<10} {}", name, count);
    }
    println!();

    let AlignmentSummary {
        sentences,
        annotator_calls,
        matched,
        corrected,
        nonspeech,
        other,
        resynchronized,
        unmatched,
        missing_annotator_data,
    } = &aligned.summary;
    println!("Alignment");
    println!("---------");
    println!("Sentences:         {}", sentences);
    println!("Annotator calls:   {}", annotator_calls);
    println!("Matched:           {}", matched);
    println!("Corrected:         {}", corrected);
    println!("Non-speech:        {}", nonspeech);
    println!("Other:             {}", other);
    println!("Resynchronized:    {}", resynchronized);
    println!("Unmatched:         {}", unmatched);
    println!("Missing tokens:    {}", missing_annotator_data);
}

async fn annotate_textgrid(input: &Path, output: &Path) -> Result<()> {
    info!("Loading TextGrid from {:?}", input);
    let (grid, _) = parse_textgrid_file(input)?;

    let prepared = prepare_sentences(&grid, &CorrectionTable::default())
        .context("Input is not annotatable")?;

    let client = NlpClient::new(NlpConfig::from_env()?);
    let result = execute_stage1(&client, &prepared.jobs, &Stage1Config::default()).await?;

    info!("Writing {} annotations to {:?}", result.cache.len(), output);
    result.cache.write_json(output)
}

fn convert_to_bids(input: &Path) -> Result<()> {
    info!("Loading tagged TextGrid from {:?}", input);
    let (grid, _) = parse_textgrid_file(input)?;

    let result = grid_to_rows(&grid);
    let output = tsv_output_path(input);

    info!("Writing {} rows to {:?}", result.rows.len(), output);
    write_tsv_file(&output, &result.rows)
}

fn print_stats(input: &Path) -> Result<()> {
    let rows = parse_tsv_file(input)?;
    let stats = DescriptiveStats::from_rows(&rows, &SegmentConfig::default());
    print!("{}", stats.render());
    Ok(())
}

fn import_vocal(input: &Path, output: &Path) -> Result<()> {
    info!("Loading speech table from {:?}", input);
    let rows = parse_vocal_csv_file(input)?;

    info!("Writing {} sentences to {:?}", rows.len(), output);
    write_sentence_grid_file(output, &rows, &TemplateConfig::default())
        .with_context(|| format!("Failed to convert {:?}", input))
}
