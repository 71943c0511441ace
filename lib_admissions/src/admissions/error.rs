use thiserror::Error;

use crate::retrieve::ky_http::RetrieveError;

/// Why the analytics endpoint could not supply data.
///
/// These never reach callers of the fetch operations; they are logged and the
/// synthetic fallback is served instead.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Retrieve(#[from] RetrieveError),

    #[error("analytics endpoint responded with status {status}")]
    Status { status: u16, body: Option<String> },

    #[error("invalid {header} header value")]
    Header {
        header: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
}
