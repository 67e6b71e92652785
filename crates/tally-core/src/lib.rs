//! # tally-core
//!
//! Core errors and utilities shared by the Tally crates.
//!
//! This crate provides:
//! - [`TallyError`] - Error type for configuration and input handling
//! - [`logging`] - Tracing setup for the `tally` binary and tests
//!
//! ## Example
//!
//! ```no_run
//! use tally_core::{TallyError, logging};
//!
//! fn main() -> tally_core::Result<()> {
//!     let _guard = logging::init_logging(None, false)?;
//!
//!     let limit = 0;
//!     if limit == 0 {
//!         return Err(TallyError::config_validation("top_items_limit must be positive"));
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

pub use error::{Result, TallyError};
pub use logging::{LogGuard, init_logging, init_test_logging};
