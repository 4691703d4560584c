use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::utils::validation::{validate_filename, ValidationError};

/// File extensions treated as GenBank flat files
pub const GENBANK_EXTENSIONS: &[&str] = &["gb", "gbk", "gbff"];

/// Registry version for compatibility checking
pub const REGISTRY_VERSION: &str = "1.0.0";

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to read dataset registry: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse dataset registry: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid name in dataset '{dataset}': {source}")]
    InvalidName {
        dataset: String,
        #[source]
        source: ValidationError,
    },

    #[error("Dataset '{0}' is listed more than once")]
    DuplicateDataset(String),

    #[error("Dataset '{0}' lists no files")]
    EmptyDataset(String),

    #[error("Dataset '{dataset}' lists more than one link file: {files:?}")]
    MultipleLinkFiles { dataset: String, files: Vec<String> },
}

/// Check whether a file name or path has a GenBank extension.
///
/// Matching is exact: `a.GBK` is not a GenBank file.
#[must_use]
pub fn is_genbank_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| GENBANK_EXTENSIONS.contains(&ext))
}

/// A named example dataset and the remote files that make it up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEntry {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Remote file names, in download order
    pub files: Vec<String>,
}

impl DatasetEntry {
    pub fn new<S: Into<String>>(name: impl Into<String>, files: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.into(),
            description: None,
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    /// GenBank files of this dataset, in registry order
    pub fn genbank_files(&self) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .map(String::as_str)
            .filter(|f| is_genbank_file(Path::new(f)))
    }

    /// The single non-GenBank file of this dataset, if any
    #[must_use]
    pub fn link_file(&self) -> Option<&str> {
        self.files
            .iter()
            .map(String::as_str)
            .find(|f| !is_genbank_file(Path::new(f)))
    }

    fn validate(&self) -> Result<(), RegistryError> {
        let invalid = |source| RegistryError::InvalidName {
            dataset: self.name.clone(),
            source,
        };

        validate_filename(&self.name).map_err(invalid)?;
        for file in &self.files {
            validate_filename(file).map_err(invalid)?;
        }

        if self.files.is_empty() {
            return Err(RegistryError::EmptyDataset(self.name.clone()));
        }

        let link_files: Vec<String> = self
            .files
            .iter()
            .filter(|f| !is_genbank_file(Path::new(f)))
            .cloned()
            .collect();
        if link_files.len() > 1 {
            return Err(RegistryError::MultipleLinkFiles {
                dataset: self.name.clone(),
                files: link_files,
            });
        }

        Ok(())
    }
}

/// Serializable registry format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryData {
    pub version: String,
    pub datasets: Vec<DatasetEntry>,
}

/// The set of known datasets, indexed by name
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    /// All datasets, in registry order
    pub datasets: Vec<DatasetEntry>,

    /// Index: dataset name -> index in datasets vec
    name_to_index: HashMap<String, usize>,
}

impl DatasetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            datasets: Vec::new(),
            name_to_index: HashMap::new(),
        }
    }

    /// Load the embedded default registry
    ///
    /// # Errors
    ///
    /// Returns a `RegistryError` if the embedded JSON is invalid. `build.rs`
    /// checks the same rules, so this only fails on a broken build.
    pub fn embedded() -> Result<Self, RegistryError> {
        // Validated at compile time by build.rs
        const EMBEDDED_REGISTRY: &str = include_str!("../../assets/datasets.json");
        Self::from_json(EMBEDDED_REGISTRY)
    }

    /// Load a registry from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ReadError` if the file cannot be read, or any
    /// error from [`DatasetRegistry::from_json`].
    pub fn load_from_file(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a registry from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ParseError` for malformed JSON, or a validation
    /// error if any entry is unsafe, empty, duplicated or lists more than one
    /// link file.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let data: RegistryData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != REGISTRY_VERSION {
            warn!(
                "Dataset registry version mismatch (expected {}, found {})",
                REGISTRY_VERSION, data.version
            );
        }

        let mut registry = Self::new();
        for entry in data.datasets {
            registry.add_dataset(entry)?;
        }

        Ok(registry)
    }

    /// Add a dataset to the registry
    ///
    /// # Errors
    ///
    /// Returns a `RegistryError` if the entry fails validation or its name is
    /// already registered.
    pub fn add_dataset(&mut self, entry: DatasetEntry) -> Result<(), RegistryError> {
        entry.validate()?;

        if self.name_to_index.contains_key(&entry.name) {
            return Err(RegistryError::DuplicateDataset(entry.name));
        }

        self.name_to_index
            .insert(entry.name.clone(), self.datasets.len());
        self.datasets.push(entry);
        Ok(())
    }

    /// Get a dataset by name
    pub fn get(&self, name: &str) -> Option<&DatasetEntry> {
        self.name_to_index.get(name).map(|&idx| &self.datasets[idx])
    }

    /// Dataset names, in registry order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.datasets.iter().map(|d| d.name.as_str())
    }

    /// Export registry to JSON
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, RegistryError> {
        let data = RegistryData {
            version: REGISTRY_VERSION.to_string(),
            datasets: self.datasets.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of datasets in the registry
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl Default for DatasetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
