//! OAS Docs - Command-line tool for building OpenAPI documents.
//!
//! Reads an API definition (routes, components and metadata) from a YAML or JSON file,
//! validates its references and writes the assembled OpenAPI document.
//!
//! # Usage
//!
//! ```bash
//! oas-docs [OPTIONS] <DEFINITION>
//! ```
//!
//! # Examples
//!
//! Write YAML to the default location (`./internal/dist/openapi.yaml`):
//! ```bash
//! oas-docs api.yaml
//! ```
//!
//! Write JSON to a custom path:
//! ```bash
//! oas-docs api.yaml -o docs/openapi.json
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use oas_docs::cli;

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

    info!("OAS Docs starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    info!("OpenAPI document generation completed successfully");

    Ok(())
}
