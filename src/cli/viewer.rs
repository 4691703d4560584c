use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::viewer::{GidMap, ViewerAssets};

/// Figure and metadata inputs shared by `viewer` and `serve`
#[derive(Args)]
pub struct ViewerInputArgs {
    /// SVG figure rendered with per-group ids
    #[arg(long, required = true)]
    pub svg: PathBuf,

    /// JSON object mapping feature group ids to metadata
    #[arg(long)]
    pub features: Option<PathBuf>,

    /// JSON object mapping link group ids to metadata
    #[arg(long)]
    pub links: Option<PathBuf>,

    /// Directory with a custom viewer-template.html and CSS/JS assets
    #[arg(long)]
    pub assets: Option<PathBuf>,
}

impl ViewerInputArgs {
    /// Read the assets, figure and both metadata maps
    ///
    /// # Errors
    ///
    /// Returns an error if any input cannot be read or a metadata file is not
    /// a JSON object of objects.
    pub fn load(&self) -> anyhow::Result<(ViewerAssets, String, GidMap, GidMap)> {
        let assets = match &self.assets {
            Some(dir) => ViewerAssets::from_dir(dir)
                .with_context(|| format!("Failed to load viewer assets from {}", dir.display()))?,
            None => ViewerAssets::embedded(),
        };

        let svg = std::fs::read_to_string(&self.svg)
            .with_context(|| format!("Failed to read SVG figure {}", self.svg.display()))?;

        let features = read_gid_map(self.features.as_deref())?;
        let links = read_gid_map(self.links.as_deref())?;

        Ok((assets, svg, features, links))
    }
}

fn read_gid_map(path: Option<&Path>) -> anyhow::Result<GidMap> {
    let Some(path) = path else {
        return Ok(GidMap::new());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let expected = || {
        format!(
            "{} must be a JSON object mapping group ids to metadata objects",
            path.display()
        )
    };

    let map: GidMap = serde_json::from_str(&content).with_context(expected)?;
    if let Some((gid, _)) = map.iter().find(|(_, metadata)| !metadata.is_object()) {
        anyhow::bail!("{}: metadata of group '{gid}' is not an object", expected());
    }
    Ok(map)
}

#[derive(Args)]
pub struct ViewerArgs {
    #[command(flatten)]
    pub input: ViewerInputArgs,

    /// Output HTML file
    #[arg(short, long, required = true)]
    pub output: PathBuf,

    /// Open the page in the default browser
    #[arg(long)]
    pub open: bool,
}

/// Execute viewer subcommand
///
/// # Errors
///
/// Returns an error if the inputs cannot be read, the figure lacks a feature
/// group id, or the page cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ViewerArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (assets, svg, features, links) = args.input.load()?;

    if verbose {
        eprintln!(
            "Loaded {} bytes of SVG, {} feature groups, {} link groups",
            svg.len(),
            features.len(),
            links.len()
        );
    }

    let html = assets.assemble(&svg, &features, &links)?;
    std::fs::write(&args.output, &html)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    match format {
        OutputFormat::Text => println!("Wrote viewer to {}", args.output.display()),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "output": args.output.display().to_string(),
                "bytes": html.len(),
                "features": features.len(),
                "links": links.len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("output\tbytes\tfeatures\tlinks");
            println!(
                "{}\t{}\t{}\t{}",
                args.output.display(),
                html.len(),
                features.len(),
                links.len()
            );
        }
    }

    if args.open {
        open::that(&args.output)
            .with_context(|| format!("Failed to open {}", args.output.display()))?;
    }

    Ok(())
}
