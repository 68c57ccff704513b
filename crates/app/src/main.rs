//! Tally Command-Line Interface

use std::process;

use clap::Parser;

use crate::cli::Cli;

mod cli;

#[tokio::main(flavor = "current_thread")]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = cli.run().await {
        #[expect(
            clippy::print_stderr,
            reason = "command failures are reported on the terminal, logging may be filtered"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}
