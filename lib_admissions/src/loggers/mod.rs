/// Installs the global `tracing` subscriber used by the binaries.
pub mod tracing_setup;

pub use tracing_setup::{setup_logging, LoggerError};
