use crate::config::DocConfig;
use crate::files::write_to_file;
use crate::pipeline::Documenter;
use crate::registry::Registry;
use crate::render::RendererKind;
use crate::snapshot::HostSnapshot;
use crate::translator::Translator;
use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Generate API reference documentation from a web application's metadata snapshot
#[derive(Parser, Debug)]
#[command(name = "apidoc-from-metadata")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the host metadata snapshot (YAML or JSON)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot_path: PathBuf,

    /// Documentation config file with settings and overrides
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Directory of additional locale files
    #[arg(short = 'l', long = "locales", value_name = "DIR")]
    pub locales_path: Option<PathBuf>,

    /// Locale used for display texts
    #[arg(long = "locale", default_value = "en")]
    pub locale: String,

    /// Output dialect (overrides the config file)
    #[arg(short = 'f', long = "format", value_enum)]
    pub format: Option<RendererKind>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    require_file(&args.snapshot_path, "Snapshot")?;
    if let Some(ref config) = args.config_path {
        require_file(config, "Config file")?;
    }
    if let Some(ref locales) = args.locales_path {
        if !locales.exists() {
            anyhow::bail!("Locales directory does not exist: {}", locales.display());
        }
        if !locales.is_dir() {
            anyhow::bail!("Locales path is not a directory: {}", locales.display());
        }
    }
    if args.locale.trim().is_empty() {
        anyhow::bail!("Locale must not be empty");
    }

    info!("Snapshot: {}", args.snapshot_path.display());
    if let Some(ref config) = args.config_path {
        info!("Config file: {}", config.display());
    }
    info!("Locale: {}", args.locale);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

fn require_file(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("{} does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        anyhow::bail!("{} is not a file: {}", what, path.display());
    }
    Ok(())
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    let content = generate_document(&args)?;

    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
        info!("Successfully wrote documentation to {}", output_path.display());
    } else {
        print!("{}", content);
    }

    Ok(())
}

/// Load every input named by `args` and produce the document text.
pub fn generate_document(args: &CliArgs) -> Result<String> {
    info!("Loading snapshot...");
    let host = HostSnapshot::from_path(&args.snapshot_path)?;
    info!(
        "Snapshot lists {} routes, {} serializers, {} controllers",
        host.routes.len(),
        host.serializers.len(),
        host.controllers.len()
    );

    let mut config = match &args.config_path {
        Some(path) => DocConfig::from_path(path)?,
        None => DocConfig::default(),
    };
    if let Some(format) = args.format {
        config.renderer = Some(format);
    }
    let mut registry = Registry::new();
    config.register(&mut registry);

    let mut translator = Translator::with_defaults(&args.locale)
        .context("Failed to load built-in locale table")?;
    if let Some(dir) = &args.locales_path {
        let count = translator
            .load_dir(dir)
            .with_context(|| format!("Failed to load locales from {}", dir.display()))?;
        info!("Loaded {} locale files", count);
    }

    let content = Documenter::new(&host, &registry, &translator)
        .generate()
        .context("Documentation generation failed")?;
    Ok(content)
}
