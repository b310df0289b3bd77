//! MGD Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging for the MGD load workspace.
//!
//! - **Error Handling**: [`MgdError`] and the [`Result`] alias used at run level
//! - **Logging**: `tracing` subscriber setup driven by [`logging::LogConfig`]
//!
//! # Example
//!
//! ```no_run
//! use mgd_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_logging(&LogConfig::from_env()?)?;
//!     tracing::info!("load started");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

pub use error::{MgdError, Result};
