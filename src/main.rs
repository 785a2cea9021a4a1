use anyhow::Result;
use clap::Parser;
use inspector::Settings;
use inspector::cli::commands::{init, parse};
use inspector::cli::{Cli, Commands};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Commands::Init { force } = cli.command {
        init::run_init(force)?;
        return Ok(ExitCode::SUCCESS);
    }

    // A broken config file is reported but never blocks parsing
    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let mut settings = loaded.unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        Settings::default()
    });
    inspector::logging::init_with_config(&settings.logging);

    match cli.command {
        Commands::Init { .. } => Ok(ExitCode::SUCCESS),
        Commands::Config => {
            init::run_config(&settings)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Parse {
            paths,
            json,
            coverage,
            threads,
        } => {
            if let Some(threads) = threads {
                settings.parser.parallel_threads = threads;
            }
            let failed = parse::run(&paths, json, coverage.as_deref(), &settings)?;
            if failed > 0 {
                eprintln!("{failed} file(s) could not be parsed");
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
