use clap::Parser;
use std::path::PathBuf;

/// Generates random deposit, withdrawal, dispute, resolve and chargeback rows
/// for exercising a transaction processor.
#[derive(Parser, Debug)]
#[command(name = "tx-generator")]
pub struct Args {
    /// Number of rows to generate
    pub rowcount: u64,

    /// Output csv file, created or overwritten
    pub output: PathBuf,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Fix the client count instead of drawing it; clients come from [1, N)
    #[arg(long, value_name = "N")]
    pub clients: Option<u16>,

    /// Read the written file back and check it matches what was generated
    #[arg(long)]
    pub verify: bool,
}
