use thiserror::Error;

/// Errors from the report data source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Credentials or token were rejected.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Network-level failure while talking to the report API.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The report API answered with a non-success status.
    #[error("Report API error: status {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded into rows.
    #[error("Malformed report payload: {0}")]
    Payload(String),
}

/// Errors from a single messaging-gateway delivery attempt.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The delivery target does not name a reachable destination.
    #[error("Invalid delivery target '{0}'")]
    InvalidTarget(String),

    /// The gateway transport rejected or dropped the message.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Errors surfaced from one firing of the report pipeline.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Fetch or auth failure upstream. Not retried: the firing is aborted.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The delivery retry budget is exhausted. `source` is the error from
    /// the final attempt.
    #[error("Delivery failed after {attempts} attempts: {source}")]
    DeliveryFailed { attempts: u32, source: GatewayError },
}
