//! Command-line tool generating API reference documentation from a host
//! metadata snapshot.
//!
//! # Usage
//!
//! ```bash
//! apidoc-from-metadata [OPTIONS] <SNAPSHOT>
//! ```
//!
//! # Examples
//!
//! Generate Markdown with overrides:
//! ```bash
//! apidoc-from-metadata snapshot.yml -c apidoc.yml -o doc/api.md
//! ```
//!
//! Generate API Blueprint with extra locale files:
//! ```bash
//! apidoc-from-metadata snapshot.yml -f api-blueprint -l config/locales
//! ```

use anyhow::Result;
use apidoc_from_metadata::cli;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("API documentation generator starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    info!("Documentation generation completed successfully");

    Ok(())
}
