//! Example dataset registry and cached loader.
//!
//! Datasets are small bundles of GenBank files plus at most one link file,
//! hosted at [`loader::DEFAULT_BASE_URL`]. Files are downloaded on first use
//! and kept under `~/.cache/genomeviz-kit/<dataset>/`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use genomeviz_kit::dataset::load_dataset;
//!
//! let phage = load_dataset("phage").unwrap();
//! for gbk in &phage.genbank_files {
//!     println!("{}", gbk.display());
//! }
//! println!("{} links", phage.links.len());
//! ```

pub mod loader;
pub mod registry;

pub use loader::{load_dataset, DatasetError, DatasetLoader, LoadedDataset};
pub use registry::{DatasetEntry, DatasetRegistry, RegistryError};
