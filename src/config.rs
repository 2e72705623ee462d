use crate::analysis::MonotonicPolicy;
use crate::formats::nyt::CandidateKeys;
use std::path::PathBuf;

/// Resolved settings for one `analyze` run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub output_csv: PathBuf,
    pub plot_dir: PathBuf,
    /// State slugs, in export order
    pub states: Vec<String>,
    pub candidate_keys: CandidateKeys,
    pub url_template: String,
    pub download: bool,
    pub plots: bool,
    pub policy: MonotonicPolicy,
}
