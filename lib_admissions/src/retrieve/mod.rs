//! # Data Retrieval Module
//!
//! Generic HTTP retrieval used by the analytics fetcher. Request building,
//! header injection, timeouts and the optional retry middleware live here so
//! that callers only deal with a status flag and a deserialized body.
//!
//! ## Contained Modules:
//!
//! - **`ky_http`**: An `ApiClient` built on `reqwest` and `reqwest-middleware`.
//!   Non-2xx responses are reported through `ApiResponse::success` instead of
//!   an error, matching how the callers decide on fallbacks.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Generic HTTP API client with optional retry middleware.
pub mod ky_http;
