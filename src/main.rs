use crate::args::Args;
use crate::generator::{ClientCount, RowGenerator};
use anyhow::{ensure, Result};
use clap::Parser;
use std::process;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod args;
mod generator;
mod output;
mod row;
mod util;

fn run(args: Args) -> Result<()> {
    let client_count = args.clients.map(ClientCount::new).transpose()?;

    let mut generator = match args.seed {
        Some(seed) => {
            debug!("Seeding generator with {seed}");
            RowGenerator::from_seed(seed, client_count)
        }
        None => RowGenerator::from_os_rng(client_count),
    };
    debug!("Drawing clients from [1, {})", generator.client_count().get());

    // All rows are generated before the output file is touched
    let (rows, summary) = generator.generate(args.rowcount)?;
    output::write_rows(&args.output, &rows)?;

    if args.verify {
        let written = output::read_rows(&args.output)?;
        ensure!(
            written == rows,
            "{} doesn't match the generated rows",
            args.output.display()
        );
        info!("Verified {} rows in {}", summary.rows, args.output.display());
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        error!("{e:#}");
        process::exit(1);
    }
}
