pub mod csv;
pub mod plot;

pub use self::csv::{write_table, write_table_to};
pub use self::plot::{save_ratio_plot, write_ratio_plot};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExportError>;
