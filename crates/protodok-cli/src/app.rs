//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use protodok_core::{Extractor, ModelKind, ResultMapping, Settings};
use protodok_ooxml::load_document;
use protodok_summarize::{
    GenerationPolicy, HttpGenerator, SummarizeError, Summarizer, SummaryMapping, TextGenerator,
};

use crate::package::StagingArea;

/// Output format for the sections command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output, same shape as the archived records
    Json,
}

/// Generative model selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelChoice {
    Pegasus,
    Llama2,
}

impl From<ModelChoice> for ModelKind {
    fn from(choice: ModelChoice) -> Self {
        match choice {
            ModelChoice::Pegasus => ModelKind::Pegasus,
            ModelChoice::Llama2 => ModelKind::Llama2,
        }
    }
}

#[derive(Parser)]
#[command(name = "protodok")]
#[command(author, version, about = "Section extraction for study protocols", long_about = None)]
struct Cli {
    /// Settings file (defaults to protodok.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract wanted sections from DOCX protocols into a JSON archive
    Extract {
        /// Input DOCX files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output archive
        #[arg(short, long, default_value = "output.zip")]
        output: PathBuf,
    },

    /// Print the extracted sections of one document
    Sections {
        /// Input DOCX file
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Summarize the sections of a DOCX (or an extracted JSON record)
    Summarize {
        /// Input DOCX or JSON file
        input: PathBuf,

        /// Output archive
        #[arg(short, long, default_value = "summary.zip")]
        output: PathBuf,

        /// Model family (overrides the settings file)
        #[arg(long, value_enum)]
        model: Option<ModelChoice>,

        /// Inference server URL (overrides the settings file)
        #[arg(long)]
        endpoint: Option<String>,
    },
}

/// Result of a summarize run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// Summary archived at the given path
    Archived(PathBuf),
    /// Model could not be used; the message carries the guidance
    Skipped(String),
}

impl fmt::Display for SummaryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryOutcome::Archived(path) => write!(f, "Archive written: {}", path.display()),
            SummaryOutcome::Skipped(message) => write!(f, "No summary written: {}", message),
        }
    }
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut settings = Settings::discover(cli.config.as_deref()).context("Failed to load settings")?;

    match cli.command {
        Commands::Extract { inputs, output } => {
            extract_command(&inputs, &output, &settings)?;
        }
        Commands::Sections { input, format } => {
            sections_command(&input, format, &settings)?;
        }
        Commands::Summarize {
            input,
            output,
            model,
            endpoint,
        } => {
            if let Some(model) = model {
                settings.summarization.model = model.into();
            }
            if let Some(endpoint) = endpoint {
                settings.summarization.endpoint = endpoint;
            }
            summarize_command(&input, &output, &settings)?;
        }
    }

    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` adds directives
fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Read one DOCX and build its result mapping
pub fn extract_document(input: &Path, settings: &Settings) -> Result<ResultMapping> {
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let document = load_document(input)
        .with_context(|| format!("Failed to read DOCX file: {}", input.display()))?;

    let extractor = Extractor::from_settings(&settings.extraction);
    let mapping = extractor.process(&document);
    info!(
        "{}: {} paragraphs, {} wanted sections",
        input.display(),
        document.len(),
        mapping.len()
    );
    Ok(mapping)
}

/// Execute the extract command
pub fn extract_command(inputs: &[PathBuf], output: &Path, settings: &Settings) -> Result<()> {
    println!("protodok v{}", protodok_core::VERSION);

    let mut staging = StagingArea::new()?;
    for input in inputs {
        println!("Extracting: {}", input.display());
        let mapping = extract_document(input, settings)?;
        if mapping.is_empty() {
            println!("  No wanted sections found");
        }
        let name = staging.write_record(&mapping)?;
        println!("  {} sections -> {}", mapping.len(), name);
    }

    let delivered = staging.into_archive()?.deliver_to(output)?;
    println!("Archive written: {}", delivered.display());
    Ok(())
}

/// Execute the sections command
pub fn sections_command(input: &Path, format: OutputFormat, settings: &Settings) -> Result<()> {
    let mapping = extract_document(input, settings)?;
    print!("{}", render_sections(&mapping, format)?);
    Ok(())
}

/// Format a result mapping for display
pub fn render_sections(mapping: &ResultMapping, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(mapping.to_json_pretty()? + "\n"),
        OutputFormat::Text => {
            let mut out = String::new();
            if mapping.is_empty() {
                out.push_str("No wanted sections found.\n");
            }
            for (heading, entry) in mapping.iter() {
                writeln!(out, "== {} ==", heading)?;
                writeln!(out, "{}", entry.section)?;
                if let Some(abstract_text) = &entry.abstract_text {
                    writeln!(out, "Abstract: {}", abstract_text)?;
                }
                out.push('\n');
            }
            Ok(out)
        }
    }
}

/// Execute the summarize command against the configured inference server
pub fn summarize_command(input: &Path, output: &Path, settings: &Settings) -> Result<()> {
    let generator = HttpGenerator::from_settings(&settings.summarization)
        .context("Failed to create inference client")?;

    println!(
        "Summarizing {} with {} at {}",
        input.display(),
        settings.summarization.model,
        generator.base_url()
    );

    let outcome = summarize_with(generator, input, output, settings)?;
    match &outcome {
        SummaryOutcome::Archived(_) => println!("{}", outcome),
        SummaryOutcome::Skipped(_) => warn!("{}", outcome),
    }
    Ok(())
}

/// Summarize `input` with any generator and archive the result
///
/// An unavailable model is not an error: the outcome carries the guidance
/// and no archive is written.
pub fn summarize_with<G: TextGenerator>(
    generator: G,
    input: &Path,
    output: &Path,
    settings: &Settings,
) -> Result<SummaryOutcome> {
    let summarizer = Summarizer::new(
        generator,
        GenerationPolicy::from_settings(&settings.summarization),
    );

    let summary = match summarize_input(&summarizer, input, settings) {
        Ok(summary) => summary,
        Err(err) => match err.downcast::<SummarizeError>() {
            Ok(err) if err.is_recoverable() => return Ok(SummaryOutcome::Skipped(err.to_string())),
            Ok(err) => return Err(err.into()),
            Err(err) => return Err(err),
        },
    };

    let mut staging = StagingArea::new()?;
    staging.write_record(&summary)?;
    let delivered = staging.into_archive()?.deliver_to(output)?;
    Ok(SummaryOutcome::Archived(delivered))
}

fn summarize_input<G: TextGenerator>(
    summarizer: &Summarizer<G>,
    input: &Path,
    settings: &Settings,
) -> Result<SummaryMapping> {
    let is_json = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        return Ok(summarizer.summarize_file(input)?);
    }

    let mapping = extract_document(input, settings)?;
    Ok(summarizer.summarize(&mapping)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use protodok_core::SectionEntry;

    #[test]
    fn test_cli_parse_extract() {
        let args = vec!["protodok", "extract", "a.docx", "b.docx", "--output", "out.zip"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Extract { inputs, output } => {
                assert_eq!(inputs, vec![PathBuf::from("a.docx"), PathBuf::from("b.docx")]);
                assert_eq!(output, PathBuf::from("out.zip"));
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_cli_parse_extract_default_output() {
        let cli = Cli::try_parse_from(["protodok", "extract", "a.docx"]).unwrap();

        match cli.command {
            Commands::Extract { output, .. } => assert_eq!(output, PathBuf::from("output.zip")),
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_cli_extract_requires_input() {
        assert!(Cli::try_parse_from(["protodok", "extract"]).is_err());
    }

    #[test]
    fn test_cli_parse_sections_json() {
        let cli = Cli::try_parse_from(["protodok", "sections", "p.docx", "--format", "json"]).unwrap();

        match cli.command {
            Commands::Sections { input, format } => {
                assert_eq!(input, PathBuf::from("p.docx"));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("Expected Sections command"),
        }
    }

    #[test]
    fn test_cli_parse_summarize() {
        let args = vec![
            "protodok",
            "summarize",
            "output0.json",
            "--model",
            "llama2",
            "--endpoint",
            "http://gpu:8080",
            "-v",
            "--config",
            "custom.toml",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));

        match cli.command {
            Commands::Summarize {
                input,
                output,
                model,
                endpoint,
            } => {
                assert_eq!(input, PathBuf::from("output0.json"));
                assert_eq!(output, PathBuf::from("summary.zip"));
                assert_eq!(model.map(ModelKind::from), Some(ModelKind::Llama2));
                assert_eq!(endpoint.as_deref(), Some("http://gpu:8080"));
            }
            _ => panic!("Expected Summarize command"),
        }
    }

    #[test]
    fn test_summary_outcome_messages() {
        let archived = SummaryOutcome::Archived(PathBuf::from("summary.zip"));
        assert_eq!(archived.to_string(), "Archive written: summary.zip");

        let skipped = SummaryOutcome::Skipped("Model llama2 is unavailable: use pegasus".into());
        assert_eq!(
            skipped.to_string(),
            "No summary written: Model llama2 is unavailable: use pegasus"
        );
    }

    #[test]
    fn test_render_sections_text() {
        let mut mapping = ResultMapping::new();
        mapping.insert(
            "POPULATION",
            SectionEntry::new("full cohort", Some("elderly adults".to_string())),
        );
        mapping.insert("TITLE", SectionEntry::new("Falls", None));

        let text = render_sections(&mapping, OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "== POPULATION ==\nfull cohort\nAbstract: elderly adults\n\n== TITLE ==\nFalls\n\n"
        );
    }

    #[test]
    fn test_render_empty_mapping() {
        let text = render_sections(&ResultMapping::new(), OutputFormat::Text).unwrap();
        assert_eq!(text, "No wanted sections found.\n");
        assert_eq!(
            render_sections(&ResultMapping::new(), OutputFormat::Json).unwrap(),
            "{}\n"
        );
    }
}
