use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::dataset::{DatasetLoader, DatasetRegistry, LoadedDataset};

#[derive(Args)]
pub struct DatasetArgs {
    #[command(subcommand)]
    pub command: DatasetCommands,
}

#[derive(Subcommand)]
pub enum DatasetCommands {
    /// List the known datasets
    List {
        /// Path to a custom dataset registry (JSON)
        #[arg(long)]
        registry: Option<PathBuf>,
    },

    /// Download a dataset into the cache (if needed) and report its files
    Load {
        /// Dataset name (e.g., "phage")
        #[arg(required = true)]
        name: String,

        /// Cache root (defaults to ~/.cache/genomeviz-kit)
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Base URL the dataset files are downloaded from
        #[arg(long)]
        base_url: Option<String>,

        /// Path to a custom dataset registry (JSON)
        #[arg(long)]
        registry: Option<PathBuf>,
    },
}

/// Execute dataset subcommand
///
/// # Errors
///
/// Returns an error if the registry cannot be loaded, the dataset is unknown,
/// or a download fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: DatasetArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        DatasetCommands::List { registry } => {
            let registry = load_registry(registry.as_deref())?;
            print_registry(&registry, format)
        }
        DatasetCommands::Load {
            name,
            cache_dir,
            base_url,
            registry,
        } => {
            let mut loader = match cache_dir {
                Some(dir) => DatasetLoader::from_cache_root(dir)?,
                None => DatasetLoader::new()?,
            };
            if let Some(url) = base_url {
                loader = loader.with_base_url(url);
            }
            if let Some(path) = registry {
                loader = loader.with_registry(DatasetRegistry::load_from_file(&path)?);
            }

            if verbose {
                eprintln!("Using cache directory {}", loader.cache_dir(&name).display());
            }

            let loaded = loader.load(&name)?;
            print_loaded(&loaded, format)
        }
    }
}

fn load_registry(path: Option<&Path>) -> anyhow::Result<DatasetRegistry> {
    Ok(match path {
        Some(path) => DatasetRegistry::load_from_file(path)?,
        None => DatasetRegistry::embedded()?,
    })
}

fn print_registry(registry: &DatasetRegistry, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("Datasets ({} total)", registry.len());
            println!("{}", "=".repeat(60));
            for dataset in &registry.datasets {
                println!("\n{}", dataset.name);
                if let Some(description) = &dataset.description {
                    println!("  {description}");
                }
                for file in &dataset.files {
                    println!("  - {file}");
                }
            }
        }
        OutputFormat::Json => println!("{}", registry.to_json()?),
        OutputFormat::Tsv => {
            println!("name\tgenbank_files\tlink_file");
            for dataset in &registry.datasets {
                println!(
                    "{}\t{}\t{}",
                    dataset.name,
                    dataset.genbank_files().collect::<Vec<_>>().join(","),
                    dataset.link_file().unwrap_or("")
                );
            }
        }
    }
    Ok(())
}

fn print_loaded(loaded: &LoadedDataset, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("Dataset: {}", loaded.name);
            println!("Cache: {}", loaded.cache_dir.display());
            println!("\nGenBank files:");
            for path in &loaded.genbank_files {
                println!("  {}", path.display());
            }
            println!("\nLinks: {}", loaded.links.len());
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(loaded)?),
        OutputFormat::Tsv => {
            println!("dataset\tgenbank_file");
            for path in &loaded.genbank_files {
                println!("{}\t{}", loaded.name, path.display());
            }
        }
    }
    Ok(())
}
