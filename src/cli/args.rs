//! CLI argument parsing using clap.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::path::PathBuf;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Java source inspector
#[derive(Parser, Debug)]
#[command(
    name = "inspector",
    version = env!("CARGO_PKG_VERSION"),
    about = "Parse Java sources into a code model",
    long_about = "Tokenize Java source files, build their class/method/block model and overlay line coverage.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
pub struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true, env = "INSPECTOR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up .inspector directory with default configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Display active settings
    Config,

    /// Parse files or directories and print their code model
    Parse {
        /// Java files or directories to parse
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Print the full model as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Covered lines to overlay, e.g. "3,14-20"
        #[arg(long, value_name = "RANGES")]
        coverage: Option<String>,

        /// Number of threads to use (overrides config)
        #[arg(short, long)]
        threads: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "inspector",
            "parse",
            "src/A.java",
            "src/b",
            "--json",
            "--coverage",
            "1-4,9",
        ])
        .unwrap();
        match cli.command {
            Commands::Parse {
                paths,
                json,
                coverage,
                threads,
            } => {
                assert_eq!(paths.len(), 2);
                assert!(json);
                assert_eq!(coverage.as_deref(), Some("1-4,9"));
                assert_eq!(threads, None);
            }
            other => panic!("unexpected command {other:?}"),
        }

        assert!(Cli::try_parse_from(["inspector", "parse"]).is_err());
    }
}
