//! Common utilities module
//!
//! This module contains shared utilities used across the letter pipeline.

pub mod error;

pub use error::{PipelineError, Result};
