pub mod encoding;
pub mod input;
pub mod output;
pub mod tsv;
pub mod vocal_csv;

pub use encoding::*;
pub use input::*;
pub use output::*;
pub use tsv::*;
pub use vocal_csv::*;
