//! Logging utilities.
//!
//! Everything in this crate logs through the `log` facade. This module only
//! owns the one-time `env_logger` setup used by host applications and tools.

mod init;

pub use init::{init_logging, LoggingConfig};
