use clap::Parser;
use tracing_subscriber::EnvFilter;

use genomeviz_kit::{cli, web};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("genomeviz_kit=debug,info")
    } else {
        EnvFilter::new("genomeviz_kit=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Dataset(args) => {
            cli::dataset::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Links(args) => {
            cli::links::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Fetch(args) => {
            cli::fetch::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Viewer(args) => {
            cli::viewer::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args)?;
        }
    }

    Ok(())
}
