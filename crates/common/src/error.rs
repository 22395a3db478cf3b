use thiserror::Error;

/// Everything that can go wrong during a single poll iteration.
///
/// All variants are retryable: the driver turns any of them into a failure
/// notification and continues after the fixed sleep. The only fatal error in
/// the system is [`crate::config::ConfigError`], which is raised before the
/// loop starts.
#[derive(Debug, Error)]
pub enum PollError {
    /// Network-level failure reaching the status endpoint.
    #[error("status endpoint is unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    /// The endpoint answered with a non-200 status (408 and 500 included).
    #[error("status endpoint returned HTTP {code}")]
    Remote { code: u16 },

    /// The endpoint answered 200 but the body is not valid JSON.
    #[error("status endpoint returned an undecodable body: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// The payload decoded but does not match the expected shape.
    #[error("unexpected response shape: {0}")]
    Schema(String),

    /// A homework record lacks a required field.
    #[error("homework record is missing the `{0}` field")]
    MissingField(&'static str),

    /// A homework record carries a status code outside the known dictionary.
    #[error("unrecognized homework status {0:?}")]
    UnknownStatus(String),
}
