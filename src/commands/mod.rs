mod analyze;
mod download;
mod info;

pub use analyze::{analyze, load_states, run_pipeline};
pub use download::download;
pub use info::info;

use crate::analysis::AnalysisError;
use crate::download::DownloadError;
use crate::export::ExportError;
use crate::formats::FormatError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Download failed: {0}")]
    Download(#[from] DownloadError),
    #[error("Failed to read {state}: {source}")]
    Format { state: String, source: FormatError },
    #[error("Failed to analyze {state}: {source}")]
    Analysis {
        state: String,
        source: AnalysisError,
    },
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
    #[error("Unknown state(s): {0}")]
    UnknownStates(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
