use thiserror::Error;

/// Failure talking to an external lookup provider.
///
/// Carries the provider name so degraded results can say which side failed.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} request failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{provider} returned status {status}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
    },
    #[error("{provider} returned a malformed response: {detail}")]
    Malformed {
        provider: &'static str,
        detail: String,
    },
}
