pub mod annotator;
pub mod bridge;
pub mod error;
pub mod heuristics;
pub mod io;
pub mod models;
pub mod stages;
pub mod stats;

pub use annotator::{AnnotationCache, AnnotationService, Annotator, NlpClient, NlpConfig};
pub use bridge::{BridgeResult, event_table, events_from_rows, grid_to_rows, rows_from_events};
pub use error::FormatError;
pub use heuristics::{CorrectionTable, Lexicon};
pub use io::{
    TemplateConfig, TextEncoding, parse_textgrid, parse_textgrid_file, parse_tsv_file,
    parse_vocal_csv_file, sentence_grid, tagged_output_path, tsv_output_path,
    write_sentence_grid_file, write_textgrid_file, write_tsv_file,
};
pub use models::{AnnotatedWord, BidsRow, Interval, NlpToken, TextGrid, Tier};
pub use stages::{
    AlignConfig, AlignmentSummary, Stage1Config, execute_stage1, execute_stage2, execute_stage3,
    prepare_sentences,
};
pub use stats::{DescriptiveStats, SegmentConfig};
