//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

use cvtex_ast::{RecordSet, Resume};
use cvtex_data::RecordDir;
use cvtex_latex::render_document;

use crate::config::{PathSettings, Settings, CONFIG_FILE_NAME};

#[derive(Parser, Debug)]
#[command(name = "cvtex")]
#[command(author, version, about = "Generate an altacv LaTeX resume from record files", long_about = None)]
pub struct Cli {
    /// Directory containing the record files
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory the LaTeX file is written into (must exist)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Name of the generated LaTeX file
    #[arg(short = 'n', long)]
    pub file_name: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the loaded records as JSON instead of writing the document
    #[arg(long)]
    pub dump_records: bool,
}

impl Cli {
    /// Apply command-line overrides on top of configured paths
    pub fn apply(&self, mut paths: PathSettings) -> PathSettings {
        if let Some(ref input) = self.input {
            paths.input_dir = input.clone();
        }
        if let Some(ref output) = self.output {
            paths.output_dir = output.clone();
        }
        if let Some(ref file_name) = self.file_name {
            paths.output_file = file_name.clone();
        }
        paths
    }
}

/// Run the CLI application
///
/// Parses arguments, resolves paths from flags, config file and defaults,
/// then either generates the document or dumps the records.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let settings = load_settings(cli.config.as_deref())?;
    let paths = cli.apply(settings.paths);

    if cli.dump_records {
        dump_command(&paths)
    } else {
        generate_command(&paths).map(|_| ())
    }
}

/// Install the log subscriber. Load errors go to standard output next to
/// the progress lines.
fn init_logging() {
    log_subscriber(std::io::stdout).init();
}

/// Plain-text subscriber: no colour codes and no timestamps, so log lines
/// read like the progress lines when the output is piped or captured.
fn log_subscriber<W>(make_writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(make_writer)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .finish()
}

/// Load every record file under the configured input directory
pub fn load_records(paths: &PathSettings) -> Result<RecordSet> {
    if !paths.input_dir.is_dir() {
        anyhow::bail!("Input directory not found: {}", paths.input_dir.display());
    }

    println!("Loading CV data from record files...");
    let dir = RecordDir::with_extension(&paths.input_dir, &paths.extension).with_context(|| {
        format!(
            "Failed to open input directory: {}",
            paths.input_dir.display()
        )
    })?;
    let records = dir.load_all();
    println!("Data loading completed!");

    Ok(records)
}

/// Execute the generate pipeline: load, render, write.
///
/// Returns the path of the written document.
pub fn generate_command(paths: &PathSettings) -> Result<PathBuf> {
    println!("cvtex v{}", cvtex_ast::VERSION);
    println!("Starting CV parsing process...");

    let records = load_records(paths)?;
    let resume = Resume::from_records(&records);

    let output_path = paths.output_path();
    println!("Writing custom LaTeX file to {}", output_path.display());

    if !paths.output_dir.is_dir() {
        anyhow::bail!(
            "Output directory not found: {}",
            paths.output_dir.display()
        );
    }

    let tex = render_document(&resume);
    fs::write(&output_path, &tex)
        .with_context(|| format!("Failed to write LaTeX file: {}", output_path.display()))?;

    println!(
        "Successfully generated {} ({} bytes)!",
        output_path.display(),
        tex.len()
    );
    println!("CV parsing completed!");

    Ok(output_path)
}

/// Execute the dump command: print the loaded records as pretty JSON
pub fn dump_command(paths: &PathSettings) -> Result<()> {
    let json = records_json(paths)?;
    println!("{}", json);
    Ok(())
}

/// Loaded records as pretty JSON, keys in file order
pub fn records_json(paths: &PathSettings) -> Result<String> {
    let records = load_records(paths)?;
    serde_json::to_string_pretty(&records).context("Failed to serialize records")
}

/// Load settings from an explicit config path, or from `cvtex.toml` in the
/// working directory when present
fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    match config_path {
        Some(path) => read_settings(path),
        None => {
            let candidate = Path::new(CONFIG_FILE_NAME);
            if candidate.exists() {
                read_settings(candidate)
            } else {
                Ok(Settings::default())
            }
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        anyhow::bail!("Config file not found: {}", path.display());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let settings = Settings::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;
    tracing::debug!("Loaded settings from {}", path.display());
    Ok(settings)
}
