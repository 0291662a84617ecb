//! protodok CLI - Command-line interface library
//!
//! This library provides the CLI functionality for protodok, including:
//! - Extract: Turn DOCX protocols into an archive of JSON section records
//! - Sections: Print the wanted sections of one protocol
//! - Summarize: Summarize the sections with a remote generative model
//!
//! # Library Usage
//!
//! ```ignore
//! use protodok_cli::{extract_command, run_cli};
//!
//! // Run the full CLI
//! run_cli();
//!
//! // Or use individual commands programmatically
//! extract_command(&inputs, Path::new("output.zip"), &settings)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Extract sections of several protocols
//! protodok extract study-a.docx study-b.docx --output output.zip
//!
//! # Inspect one protocol
//! protodok sections study-a.docx --format json
//!
//! # Summarize with a lighter model
//! protodok summarize study-a.docx --model pegasus --endpoint http://localhost:8080
//! ```

pub mod app;
pub mod package;

pub use app::{
    extract_command, extract_document, render_sections, run_cli, sections_command,
    summarize_command, summarize_with, ModelChoice, OutputFormat, SummaryOutcome,
};
pub use package::{PackagedArchive, StagingArea, ARCHIVE_NAME, STAGING_DIR};
