use crate::emitter::{build_docs, BuildConfig, DEFAULT_DOCS_OUT_PATH};
use crate::model::ApiDefinition;
use crate::serializer::OutputFormat;
use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

/// OAS Docs - Build an OpenAPI document from an API definition file
#[derive(Parser, Debug)]
#[command(name = "oas-docs")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the API definition file (YAML or JSON)
    #[arg(value_name = "DEFINITION")]
    pub definition_path: PathBuf,

    /// Output file path
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = DEFAULT_DOCS_OUT_PATH)]
    pub output_path: PathBuf,

    /// Output format (yaml or json); guessed from the output extension when omitted
    #[arg(short = 'f', long = "format", value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl CliArgs {
    /// The format to emit: the explicit flag, else the output extension, else YAML.
    pub fn resolved_format(&self) -> OutputFormat {
        self.output_format
            .or_else(|| OutputFormat::from_path(&self.output_path))
            .unwrap_or_default()
    }

    pub fn build_config(&self) -> BuildConfig {
        BuildConfig::default()
            .with_out_path(&self.output_path)
            .with_format(self.resolved_format())
    }
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.definition_path.exists() {
        anyhow::bail!(
            "Definition file does not exist: {}",
            args.definition_path.display()
        );
    }

    if !args.definition_path.is_file() {
        anyhow::bail!(
            "Definition path is not a file: {}",
            args.definition_path.display()
        );
    }

    info!("Definition file: {}", args.definition_path.display());
    info!("Output file: {}", args.output_path.display());
    info!("Output format: {:?}", args.resolved_format());

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    info!("Loading API definition...");
    let api = ApiDefinition::from_file(&args.definition_path)?;

    info!(
        "Loaded {} routes and {} components entries",
        api.routes().len(),
        api.components.len()
    );
    if api.routes().is_empty() {
        log::warn!("No routes found in the API definition");
    }

    let config = args.build_config();
    build_docs(&api, config.clone()).with_context(|| {
        format!(
            "Failed to build OpenAPI document at {}",
            config.out_path().display()
        )
    })?;

    info!("Generation complete!");
    info!("Summary:");
    info!("  - Routes: {}", api.routes().len());
    info!(
        "  - Schemas: {}",
        api.effective_components().map_or(0, |c| c.schemas.len())
    );
    info!("  - Output: {}", config.out_path().display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn test_parse_defaults() {
        let args = CliArgs::try_parse_from(["oas-docs", "api.yaml"]).unwrap();

        assert_eq!(args.definition_path, PathBuf::from("api.yaml"));
        assert_eq!(args.output_path, PathBuf::from(DEFAULT_DOCS_OUT_PATH));
        assert_eq!(args.resolved_format(), OutputFormat::Yaml);
        assert!(!args.verbose);
    }

    #[test]
    fn test_format_from_output_extension() {
        let args =
            CliArgs::try_parse_from(["oas-docs", "api.yaml", "-o", "out/openapi.json"]).unwrap();
        assert_eq!(args.resolved_format(), OutputFormat::Json);
    }

    #[test]
    fn test_explicit_format_wins() {
        let args =
            CliArgs::try_parse_from(["oas-docs", "api.yaml", "-o", "openapi.json", "-f", "yaml"])
                .unwrap();
        assert_eq!(args.resolved_format(), OutputFormat::Yaml);
        assert_eq!(args.build_config().out_path(), Path::new("openapi.json"));
    }

    #[test]
    fn test_missing_definition_rejected() {
        let args = CliArgs::try_parse_from(["oas-docs", "/definitely/not/here.yaml"]).unwrap();
        let err = parse_args_from_parsed(args).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_directory_definition_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_string_lossy().to_string();
        let args = CliArgs::try_parse_from(["oas-docs", dir.as_str()]).unwrap();

        let err = parse_args_from_parsed(args).unwrap_err();
        assert!(err.to_string().contains("is not a file"));
    }

    #[test]
    fn test_run_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let definition = temp_dir.path().join("api.yaml");
        fs::write(
            &definition,
            concat!(
                "info:\n  title: Health\n  version: 0.1.0\n",
                "paths:\n  - path: /health\n    method: GET\n",
            ),
        )
        .unwrap();
        let out = temp_dir.path().join("openapi.yaml");

        let args = CliArgs::try_parse_from([
            "oas-docs",
            definition.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ])
        .unwrap();
        run(args).unwrap();

        let content = fs::read_to_string(&out).unwrap();
        assert!(content.contains("/health:"));
    }
}
