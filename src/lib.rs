//! # GeminiCLI-RS
//!
//! A Rust SDK for programmatically driving the Gemini CLI: single-shot
//! headless invocations with a hard timeout, transient-failure retries,
//! ordered model fallback, and usage-metadata extraction.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use geminicli::{Client, QueryConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a client
//!     let client = Client::new().await?;
//!
//!     // Simple query against a pinned model
//!     let config = QueryConfig::builder("Summarize the tradeoffs of mmap vs read")
//!         .model("gemini-2.5-pro")
//!         .build()?;
//!
//!     println!("{}", client.run_query(&config).await);
//!     Ok(())
//! }
//! ```
//!
//! ## Model Fallback
//!
//! ```rust,no_run
//! use geminicli::{QueryConfig, run_query};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Try models in order; transient errors (rate limits, 503s) are
//!     // retried on the same model, permanent ones fall back immediately.
//!     let config = QueryConfig::builder("Review this code")
//!         .context("<file path=\"src/main.rs\">fn main() {}</file>")
//!         .models(vec![
//!             "gemini-2.5-pro".to_string(),
//!             "gemini-2.5-flash".to_string(),
//!         ])
//!         .build()?;
//!
//!     // Never fails: all failure modes are encoded in the returned text.
//!     println!("{}", run_query(&config).await);
//!     Ok(())
//! }
//! ```

#[cfg(not(unix))]
compile_error!("geminicli only supports Unix-like platforms (Linux/macOS). Windows is not supported.");

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod invoke;
pub mod orchestrator;
pub mod parse;
pub mod process;
mod report;
pub mod types;

// Re-export main types
pub use classify::{FailureClass, classify_failure};
pub use client::{Client, run_query};
pub use config::{DEFAULT_TIMEOUT, QueryConfig, QueryConfigBuilder};
pub use error::{GeminiError, Result};
pub use invoke::invoke_once;
pub use orchestrator::RetryPolicy;
pub use parse::{ParsedStdout, parse_cli_stdout};
pub use types::{AttemptOutcome, UsageStats};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
