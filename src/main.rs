//! Intrucept CLI - submit SAST and SCA scans to the Intrucept AppSecOps platform

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod output;
mod packager;
mod scan;

use cli::{Cli, Commands, GlobalOptions, ScanCommands};
use client::ScanType;
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `RUST_LOG` applies unless `--debug` is given
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder.format_timestamp(None).try_init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Scan(scan_cmd) => match scan_cmd {
            ScanCommands::Sast(args) => cli::scan::run(&opts, ScanType::Sast, &args).await,
            ScanCommands::Sca(args) => cli::scan::run(&opts, ScanType::Sca, &args).await,
        },
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("intrucept version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
