use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod matching;
mod parsing;
mod utils;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("patinder=debug,info")
    } else {
        EnvFilter::new("patinder=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Hash(args) => {
            cli::hash::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Query(args) => {
            cli::query::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Matrix(args) => {
            cli::matrix::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Placeholder(args) => {
            cli::placeholder::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
