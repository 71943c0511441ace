//! # lib_admissions
//!
//! Data layer for the admissions analytics dashboard. Each top-level module is
//! gated behind a cargo feature of the same name so binaries only pull in what
//! they use.
//!
//! - **`admissions`**: snapshot model, normalizer, synthetic fallback generator,
//!   the analytics fetcher and the dashboard insight helpers.
//! - **`retrieve`**: the generic JSON-over-HTTP client.
//! - **`configs`**: layered runtime configuration.
//! - **`loggers`**: `tracing` subscriber setup.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unused_qualifications)]

#[cfg(feature = "admissions")]
pub mod admissions;
#[cfg(feature = "configs")]
pub mod configs;
#[cfg(feature = "loggers")]
pub mod loggers;
#[cfg(feature = "retrieve")]
pub mod retrieve;
