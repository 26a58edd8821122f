//! biolit Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging setup, and error handling for the biolit workspace.
//!
//! # Overview
//!
//! - **Error Handling**: Custom error types and result types
//! - **Logging**: `tracing` subscriber initialization
//! - **Types**: Entity references shared by the ingest adapters
//!
//! # Example
//!
//! ```no_run
//! use biolit_common::logging::{init_logging, LogConfig};
//! use biolit_common::types::RefContext;
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&LogConfig::from_env()?)?;
//!     let ctx = RefContext::ungrounded("hepatocytes");
//!     tracing::info!(context = %ctx, "Built context");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{BiolitError, Result};
pub use types::{DbRefs, RefContext, TEXT_NAMESPACE};
