use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::core::link::Link;
use crate::parsing::links::parse_link_file;

#[derive(Args)]
pub struct LinksArgs {
    /// Link file (tab-separated, one header line; may be gzipped)
    #[arg(required = true)]
    pub input: PathBuf,
}

/// Execute links subcommand
///
/// # Errors
///
/// Returns an error if the link file cannot be read or a row is malformed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: LinksArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let links = parse_link_file(&args.input)?;

    if verbose {
        eprintln!("Parsed {} links from {}", links.len(), args.input.display());
    }

    match format {
        OutputFormat::Text => print_text_links(&links),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&links)?),
        OutputFormat::Tsv => print_tsv_links(&links),
    }

    Ok(())
}

fn print_text_links(links: &[Link]) {
    println!("Links ({} total)", links.len());
    println!("{}", "=".repeat(60));

    for link in links {
        println!(
            "{}:{}-{} -> {}:{}-{} ({:.2}%)",
            link.ref_name,
            link.ref_start,
            link.ref_end,
            link.query_name,
            link.query_start,
            link.query_end,
            link.identity
        );
    }
}

fn print_tsv_links(links: &[Link]) {
    println!("ref_name\tref_start\tref_end\tquery_name\tquery_start\tquery_end\tidentity");
    for link in links {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            link.ref_name,
            link.ref_start,
            link.ref_end,
            link.query_name,
            link.query_start,
            link.query_end,
            link.identity
        );
    }
}
