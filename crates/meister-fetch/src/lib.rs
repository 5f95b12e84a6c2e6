//! Weather Meister HTTP fetcher
//!
//! Issues one authenticated GET per call and hands back the decoded JSON
//! object untouched. No retries happen here; callers that want resilience
//! wrap [`fetch`] themselves.

pub mod client;

pub use client::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// A credential or endpoint could not be resolved
    #[error("{0} is required.")]
    Configuration(&'static str),

    /// Transport, timeout, or non-2xx status
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Body decoded but is not a JSON object
    #[error("Unexpected response format from Weather Meister: expected an object, got {0}")]
    DataFormat(&'static str),
}

pub type FetchResult<T> = Result<T, FetchError>;
