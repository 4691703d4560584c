use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::remote::entrez::EfetchRequest;

#[derive(Args)]
pub struct FetchArgs {
    /// Nucleotide accession id (e.g., "JX128258.1")
    #[arg(required = true)]
    pub accession: String,

    /// Contact email sent to NCBI (recommended for repeated downloads)
    #[arg(long)]
    pub email: Option<String>,

    /// Output file; writes to stdout if not given
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute fetch subcommand
///
/// # Errors
///
/// Returns an error if the accession is malformed, the fetch fails, or the
/// record cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: FetchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut request = EfetchRequest::new(&args.accession);
    if let Some(email) = &args.email {
        request = request.with_email(email);
    }

    let mut stream = request.send()?;

    let bytes = match &args.output {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let bytes = std::io::copy(&mut stream, &mut file)?;
            file.flush()?;
            bytes
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let bytes = std::io::copy(&mut stream, &mut out)?;
            out.flush()?;
            bytes
        }
    };

    if verbose {
        eprintln!("Fetched {bytes} bytes for {}", args.accession);
    }

    // The record itself goes to stdout when no output file is given
    if let Some(path) = &args.output {
        match format {
            OutputFormat::Text => println!("Wrote {} to {}", args.accession, path.display()),
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "accession": args.accession,
                    "output": path.display().to_string(),
                    "bytes": bytes,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Tsv => {
                println!("accession\toutput\tbytes");
                println!("{}\t{}\t{bytes}", args.accession, path.display());
            }
        }
    }

    Ok(())
}
