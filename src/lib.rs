//! # genomeviz-kit
//!
//! Data plumbing for comparative genome figures: example datasets, alignment
//! link files, GenBank records and standalone HTML viewers.
//!
//! A comparative genome plot needs a handful of annotated genomes and the
//! pairwise alignments ("links") between them. Once rendered to SVG, the figure
//! is most useful as an interactive page where hovering a gene or a link shows
//! its metadata.
//!
//! `genomeviz-kit` covers everything around the renderer itself:
//!
//! ## Features
//!
//! - **Example datasets**: Download-once cache of ready-made GenBank + link bundles
//! - **Link parsing**: Tab-separated alignment tables with fixed column roles
//! - **GenBank fetch**: Records from the NCBI nucleotide database by accession
//! - **HTML viewer**: SVG figure, CSS, JS and metadata inlined into one file
//! - **Viewer server**: Serve a viewer page locally
//!
//! ## Example
//!
//! ```rust,no_run
//! use genomeviz_kit::dataset::load_dataset;
//! use genomeviz_kit::viewer::{setup_viewer_html, GidMap};
//!
//! // Download (or reuse) the phage example dataset
//! let phage = load_dataset("phage").unwrap();
//! println!("{} genomes, {} links", phage.genbank_files.len(), phage.links.len());
//!
//! // Wrap a rendered figure into a standalone page
//! let svg = std::fs::read_to_string("phage.svg").unwrap();
//! let html = setup_viewer_html(&svg, &GidMap::new(), &GidMap::new()).unwrap();
//! std::fs::write("phage.html", html).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`core`]: The [`Link`] record
//! - [`dataset`]: Dataset registry and cached loader
//! - [`parsing`]: Link file parser
//! - [`remote`]: NCBI efetch client
//! - [`viewer`]: HTML viewer assembly
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Web server for viewer pages

pub mod cli;
pub mod core;
pub mod dataset;
pub mod parsing;
pub mod remote;
pub mod utils;
pub mod viewer;
pub mod web;

// Re-export commonly used types for convenience
pub use crate::core::link::Link;
pub use crate::dataset::{load_dataset, DatasetError, DatasetLoader, LoadedDataset};
pub use crate::parsing::links::{parse_link_file, LinkParseError};
pub use crate::remote::entrez::{fetch_genbank, EfetchRequest, FetchError};
pub use crate::viewer::{setup_viewer_html, GidMap, ViewerAssets, ViewerError};
