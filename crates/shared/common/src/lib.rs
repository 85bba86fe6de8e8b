//! Common utilities shared across the services.
//!
//! This crate provides:
//! - Unified error handling
//! - Configuration structures
//! - Tracing initialisation and secret input for the binaries

pub mod config;
pub mod error;
pub mod input;
pub mod telemetry;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use input::{read_secret, read_secret_line};
pub use telemetry::init_tracing;
