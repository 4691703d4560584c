use serde::Serialize;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::link::Link;
use crate::dataset::registry::{is_genbank_file, DatasetRegistry, RegistryError};
use crate::parsing::links::{parse_link_file, LinkParseError};

/// Remote location of the example datasets; `<dataset>/<filename>` is appended
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/moshi4/pygenomeviz-data/master/";

/// Directory under `~/.cache` holding downloaded datasets
pub const CACHE_DIR_NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("'{name}' dataset not found (available: {})", .available.join(", "))]
    UnknownDataset {
        name: String,
        available: Vec<String>,
    },

    #[error("Could not determine the home directory for the dataset cache")]
    NoHomeDirectory,

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Download failed: {0}")]
    Download(#[from] reqwest::Error),

    #[error("Failed to parse link file: {0}")]
    Links(#[from] LinkParseError),
}

/// GenBank files and links of one dataset, resolved to the local cache
#[derive(Debug, Clone, Serialize)]
pub struct LoadedDataset {
    pub name: String,
    pub cache_dir: PathBuf,
    pub genbank_files: Vec<PathBuf>,
    pub links: Vec<Link>,
}

/// Resolves dataset names to cached local files, downloading what is missing.
///
/// Each file is fetched at most once: a file already present in
/// `<cache_root>/<dataset>/` is reused without touching the network.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    registry: DatasetRegistry,
    cache_root: PathBuf,
    base_url: String,
}

impl DatasetLoader {
    /// Loader with the embedded registry, the default base URL and
    /// `~/.cache/genomeviz-kit` as cache root.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::NoHomeDirectory` if the home directory cannot be
    /// determined.
    pub fn new() -> Result<Self, DatasetError> {
        let home = dirs::home_dir().ok_or(DatasetError::NoHomeDirectory)?;
        Ok(Self {
            registry: DatasetRegistry::embedded()?,
            cache_root: home.join(".cache").join(CACHE_DIR_NAME),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Loader with an explicit cache root and the embedded registry
    ///
    /// # Errors
    ///
    /// Returns a `DatasetError::Registry` if the embedded registry is invalid.
    pub fn from_cache_root(cache_root: impl Into<PathBuf>) -> Result<Self, DatasetError> {
        Ok(Self {
            registry: DatasetRegistry::embedded()?,
            cache_root: cache_root.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_registry(mut self, registry: DatasetRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &DatasetRegistry {
        &self.registry
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Local directory holding the files of `name`
    pub fn cache_dir(&self, name: &str) -> PathBuf {
        self.cache_root.join(name)
    }

    /// Remote URL of one dataset file
    pub fn file_url(&self, name: &str, filename: &str) -> String {
        format!("{}{name}/{filename}", self.base_url)
    }

    /// Resolve `name` to its local GenBank files and parsed links.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::UnknownDataset` if `name` is not registered,
    /// `DatasetError::Io` if the cache directory cannot be written,
    /// `DatasetError::Download` if a missing file cannot be fetched, or
    /// `DatasetError::Links` if the link file is malformed.
    pub fn load(&self, name: &str) -> Result<LoadedDataset, DatasetError> {
        let entry = self
            .registry
            .get(name)
            .ok_or_else(|| DatasetError::UnknownDataset {
                name: name.to_string(),
                available: self.registry.names().map(String::from).collect(),
            })?;

        let cache_dir = self.cache_dir(name);
        std::fs::create_dir_all(&cache_dir)?;

        let (cached, missing): (Vec<&str>, Vec<&str>) = entry
            .files
            .iter()
            .map(String::as_str)
            .partition(|filename| cache_dir.join(filename).exists());

        for filename in cached {
            debug!("Cache hit: {}", cache_dir.join(filename).display());
        }

        // No client at all on a fully warm cache
        if !missing.is_empty() {
            let client = build_client()?;
            for filename in missing {
                let url = self.file_url(name, filename);
                info!("Downloading {url}");
                download_to(&client, &url, &cache_dir.join(filename))?;
            }
        }

        let mut genbank_files = Vec::new();
        let mut links = Vec::new();
        for filename in &entry.files {
            let path = cache_dir.join(filename);
            if is_genbank_file(&path) {
                genbank_files.push(path);
            } else {
                links = parse_link_file(&path)?;
            }
        }

        Ok(LoadedDataset {
            name: name.to_string(),
            cache_dir,
            genbank_files,
            links,
        })
    }
}

/// Load a dataset with the default registry, base URL and cache location.
///
/// # Errors
///
/// See [`DatasetLoader::new`] and [`DatasetLoader::load`].
pub fn load_dataset(name: &str) -> Result<LoadedDataset, DatasetError> {
    DatasetLoader::new()?.load(name)
}

fn build_client() -> Result<reqwest::blocking::Client, reqwest::Error> {
    reqwest::blocking::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Fetch `url` into `dest`.
///
/// The body is streamed into a temporary file beside `dest` and renamed into
/// place only once complete, so `dest` exists only for finished downloads.
fn download_to(
    client: &reqwest::blocking::Client,
    url: &str,
    dest: &Path,
) -> Result<(), DatasetError> {
    let dir = dest.parent().unwrap_or_else(|| Path::new("."));

    let mut response = client.get(url).send()?.error_for_status()?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    let bytes = response.copy_to(&mut tmp)?;
    tmp.persist(dest).map_err(|e| e.error)?;

    debug!("Saved {bytes} bytes to {}", dest.display());
    Ok(())
}
