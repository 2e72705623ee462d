pub mod deltas;
pub mod table;

pub use deltas::{compute_deltas, compute_deltas_with, MonotonicPolicy};
pub use table::{analyze_state, ResultRow, ResultTable, StateAnalysis};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("No time series records to analyze")]
    EmptyInput,
    #[error("Cumulative votes decreased at batch {index}: {previous} -> {current}")]
    NonMonotonicInput {
        index: usize,
        previous: u64,
        current: u64,
    },
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
