//! `herald-report` — the report pipeline: fetch rows from the report API,
//! render them as text or an HTML document, and deliver the artifact through
//! a messaging gateway with bounded exponential-backoff retry.

pub mod error;
pub mod pipeline;
pub mod render;
pub mod retry;
pub mod source;

pub use error::{GatewayError, ReportError, SourceError};
pub use pipeline::{Gateway, ReportPipeline};
pub use render::Artifact;
pub use retry::{deliver_with_retry, RetryPolicy};
pub use source::{DataSource, HttpDataSource, ReportTable};
