use crate::util::{hash_bytes, write_atomic, write_serialized};
use colored::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_URL_TEMPLATE: &str =
    "https://static01.nyt.com/elections-assets/2020/data/api/2020-11-03/race-page/{slug}/president.json";

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected status {status} fetching {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DownloadError>;

/// Where a state's raw race page is kept on disk.
pub fn data_file_path(data_dir: &Path, slug: &str) -> PathBuf {
    data_dir.join(format!("{}_data.json", slug))
}

pub fn race_url(url_template: &str, slug: &str) -> String {
    url_template.replace("{slug}", slug)
}

#[derive(Debug)]
pub struct DownloadSummary {
    pub files_written: usize,
    pub bytes_written: u64,
    /// File name -> SHA-1 of its contents
    pub manifest: BTreeMap<String, String>,
}

/// Raw race pages on disk plus the manifest describing them. Each stored page
/// is renamed into place and immediately recorded, so the manifest never lags
/// behind the files.
pub struct RaceStore {
    data_dir: PathBuf,
    manifest: BTreeMap<String, String>,
}

impl RaceStore {
    /// Open `data_dir`, picking up the manifest of an earlier run if present.
    pub fn open(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)?;

        let manifest_path = data_dir.join(MANIFEST_FILE);
        let manifest = if manifest_path.exists() {
            serde_json::from_str(&fs::read_to_string(&manifest_path)?)?
        } else {
            BTreeMap::new()
        };

        Ok(RaceStore {
            data_dir: data_dir.to_path_buf(),
            manifest,
        })
    }

    /// Write one state's page and rewrite the manifest with its digest.
    pub fn store(&mut self, slug: &str, body: &[u8]) -> Result<PathBuf> {
        let path = data_file_path(&self.data_dir, slug);
        write_atomic(&path, body)?;

        self.manifest.insert(file_name(&path), hash_bytes(body));
        write_serialized(&self.data_dir.join(MANIFEST_FILE), &self.manifest)?;

        Ok(path)
    }

    pub fn manifest(&self) -> &BTreeMap<String, String> {
        &self.manifest
    }
}

pub struct RaceDownloader {
    client: reqwest::Client,
    url_template: String,
    data_dir: PathBuf,
}

impl RaceDownloader {
    pub fn new(url_template: &str, data_dir: &Path) -> Self {
        RaceDownloader {
            client: reqwest::Client::new(),
            url_template: url_template.to_string(),
            data_dir: data_dir.to_path_buf(),
        }
    }

    /// Fetch each state's race page in turn and store the body verbatim.
    pub async fn download_states(&self, slugs: &[String]) -> Result<DownloadSummary> {
        let mut store = RaceStore::open(&self.data_dir)?;
        let mut files_written = 0;
        let mut bytes_written = 0;

        for slug in slugs {
            let url = race_url(&self.url_template, slug);
            println!("⬇️  Downloading {}", slug.bright_cyan());

            let body = self.fetch(&url).await?;
            store.store(slug, &body)?;

            files_written += 1;
            bytes_written += body.len() as u64;
        }

        Ok(DownloadSummary {
            files_written,
            bytes_written,
            manifest: store.manifest().clone(),
        })
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}
