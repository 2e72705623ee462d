use super::Result;
use crate::download::{DownloadSummary, RaceDownloader, MANIFEST_FILE};
use colored::*;
use std::path::Path;

pub async fn download(data_dir: &Path, states: &[String], url_template: &str) -> Result<DownloadSummary> {
    println!(
        "🚀 Downloading race pages for {} states into {}",
        states.len().to_string().cyan(),
        data_dir.display().to_string().cyan()
    );

    let downloader = RaceDownloader::new(url_template, data_dir);
    let summary = downloader.download_states(states).await?;

    println!(
        "✅ Downloaded {} files ({} bytes), manifest: {}",
        summary.files_written.to_string().green(),
        summary.bytes_written,
        data_dir.join(MANIFEST_FILE).display()
    );

    Ok(summary)
}
