use clap::Parser;
use std::process;

mod cli;

use cli::{Cli, USAGE};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Any invocation other than two mask paths (optionally with -v) gets the usage line.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            println!("{}", USAGE);
            process::exit(1);
        }
    };

    env_logger::Builder::new().filter_level(cli.log_level()).init();

    let score = cli.run_program()?;
    println!("{:.6}", score);
    Ok(())
}
