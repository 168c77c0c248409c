use anyhow::Result;
use clap::Parser;
use ks_forms::cli::{Cli, init_logging};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    cli.run()
}
