//! lmt CLI - Literate Markdown Tangle

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lmt::commands;
use lmt::config::{self, LineDirective};
use lmt::interface::Context;

#[derive(Parser)]
#[command(name = "lmt")]
#[command(author, version, about = "Tangle code blocks out of markdown documents", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long)]
    directory: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dry run - show what would be written without writing it
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Do not emit line directives
    #[arg(long)]
    no_line_directives: bool,

    /// Directive for languages without a known format (none, c, go)
    #[arg(long, value_name = "FORMAT", value_parser = parse_directive)]
    default_directive: Option<LineDirective>,

    /// Markdown documents or glob patterns, scanned in order
    #[arg(value_name = "FILE")]
    files: Vec<String>,
}

fn parse_directive(s: &str) -> Result<LineDirective, String> {
    LineDirective::parse(s).ok_or_else(|| format!("unknown directive format: {}", s))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let base_dir = cli
        .directory
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let config = match cli.config {
        Some(ref path) => config::read_config_file(path),
        None => config::read_config(&base_dir),
    };
    let mut config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli.no_line_directives {
        config.line_directives = false;
    }
    if let Some(directive) = cli.default_directive {
        config.default_directive = directive;
    }

    let mut ctx = Context::new(config, base_dir);
    let options = commands::TangleOptions {
        dry_run: cli.dry_run,
        quiet: false,
        files: cli.files,
    };

    match commands::tangle(&mut ctx, options) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(_) => {
            eprintln!("Error: no output file could be written");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
