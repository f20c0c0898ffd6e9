/*!
 * Command-line interface for CodeDigest
 */

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use codedigest::config::{Args, Config};
use codedigest::error::{DigestError, Result};
use codedigest::report::Reporter;
use codedigest::scanner::Scanner;
use codedigest::writer::write_digest;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    let default_level = if args.verbose {
        "codedigest=debug"
    } else {
        "codedigest=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    match run(Config::from_args(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ DigestError::UnsupportedFormat(_)) => {
            eprintln!("[-] {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("[-] Error during export: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<()> {
    // Validate configuration before touching the filesystem
    config.validate()?;

    let reporter = Reporter::new(config.report_style);
    if !config.quiet {
        print!("{}", reporter.configuration(&config));
    }

    let progress = if config.quiet {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {pos} files {wide_msg:.dim}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    };

    // Single pass over the tree; every format renders from this digest
    let scanner = Scanner::new(config.clone(), Arc::new(progress.clone()));
    let digest = scanner.scan()?;
    progress.finish_and_clear();

    let size = write_digest(&config, &digest)?;

    if !config.quiet {
        if config.include_summary {
            print!("{}", reporter.statistics(&digest));
        }
        println!("{}", reporter.created(&config.output_file, size));
    }

    Ok(())
}
