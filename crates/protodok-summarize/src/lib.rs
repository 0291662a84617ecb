//! # protodok-summarize
//!
//! Summarization adapter for protodok extraction results.
//!
//! Each leaf text of a [`protodok_core::ResultMapping`] is passed to a
//! [`TextGenerator`] under a per-model [`GenerationPolicy`]. The bundled
//! [`HttpGenerator`] talks to a remote inference server; tests and embedders
//! can supply their own generator.
//!
//! ## Example
//!
//! ```no_run
//! use protodok_core::ModelKind;
//! use protodok_summarize::{GenerationPolicy, HttpGenerator, Summarizer};
//!
//! let generator = HttpGenerator::new("http://localhost:8080", ModelKind::Pegasus)?;
//! let summarizer = Summarizer::new(generator, GenerationPolicy::for_model(ModelKind::Pegasus));
//! let summary = summarizer.summarize_file("output0.json")?;
//! println!("{}", summary.to_json_pretty()?);
//! # Ok::<(), protodok_summarize::SummarizeError>(())
//! ```

pub mod error;
pub mod generator;
pub mod http;
pub mod policy;
pub mod summarizer;

pub use error::{Result, SummarizeError};
pub use generator::{GenerationRequest, TextGenerator};
pub use http::{HttpGenerator, DEFAULT_ENDPOINT};
pub use policy::GenerationPolicy;
pub use summarizer::{RequestState, Summarizer, SummaryMapping};
