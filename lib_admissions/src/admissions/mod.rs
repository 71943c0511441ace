//! # Admissions Analytics Module
//!
//! Turns the external analytics endpoint into a dependable data source for the
//! dashboard: whatever happens upstream, callers receive a well-formed
//! [`AnalyticsSnapshot`] tagged with where it came from.
//!
//! ## Contained Modules:
//!
//! - **`model`**: the snapshot, its program and trend entries, and the
//!   `external_api` / `local_fallback` envelopes.
//! - **`normalizer`**: maps loosely-shaped payloads onto the snapshot.
//! - **`synthetic`**: the seedable fallback generator.
//! - **`filter`**: inclusive calendar-date filtering of trend series.
//! - **`apicall`**: the `AdmissionsApi` client with the all-or-nothing fallback.
//! - **`insights`** and **`report`**: derived dashboard views and a text summary.

pub mod apicall;
pub mod error;
pub mod filter;
pub mod insights;
pub mod model;
pub mod normalizer;
pub mod report;
pub mod synthetic;

pub use apicall::AdmissionsApi;
pub use error::FetchError;
pub use filter::{DateRange, TrendFilter};
pub use model::{
    AnalyticsEnvelope, AnalyticsSnapshot, MetricEnvelope, MetricType, ProgramCount, Source,
    TrendPoint,
};
pub use normalizer::normalize;
pub use synthetic::{generate_seed, SyntheticGenerator};
