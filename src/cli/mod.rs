//! Command-line interface for genomeviz-kit.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **dataset**: List the example datasets or download one into the cache
//! - **links**: Parse a genome-to-genome link file
//! - **fetch**: Fetch a GenBank record from NCBI by accession
//! - **viewer**: Build a standalone HTML viewer from an SVG figure
//! - **serve**: Serve a viewer page over local HTTP
//!
//! ## Usage
//!
//! ```text
//! # Download the phage example dataset
//! genomeviz-kit dataset load phage
//!
//! # Inspect a link file as JSON
//! genomeviz-kit links link.tsv --format json
//!
//! # Fetch a GenBank record
//! genomeviz-kit fetch JX128258.1 --email me@example.org -o JX128258.1.gbk
//!
//! # Build a viewer and open it
//! genomeviz-kit viewer --svg figure.svg --features features.json -o figure.html --open
//! ```

use clap::{Parser, Subcommand};

pub mod dataset;
pub mod fetch;
pub mod links;
pub mod viewer;

#[derive(Parser)]
#[command(name = "genomeviz-kit")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Example datasets, link files, GenBank fetch and HTML viewers for genome plots")]
#[command(
    long_about = "genomeviz-kit bundles the data plumbing around comparative genome figures.\n\nIt can:\n- Download and cache example datasets (GenBank files plus alignment links)\n- Parse tab-separated genome-to-genome link files\n- Fetch GenBank records from the NCBI nucleotide database\n- Turn an SVG figure and its metadata into a standalone interactive HTML page"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List or download example datasets
    Dataset(dataset::DatasetArgs),

    /// Parse a genome-to-genome link file
    Links(links::LinksArgs),

    /// Fetch a GenBank record by accession
    Fetch(fetch::FetchArgs),

    /// Build a standalone HTML viewer
    Viewer(viewer::ViewerArgs),

    /// Serve a viewer page over HTTP
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub input: viewer::ViewerInputArgs,

    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
