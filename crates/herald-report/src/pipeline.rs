//! One firing of a report job: fetch rows, render, deliver with retry.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use herald_core::JobSpec;

use crate::error::{GatewayError, ReportError};
use crate::render::{self, Artifact};
use crate::retry::{deliver_with_retry, RetryPolicy};
use crate::source::DataSource;

/// Outbound messaging gateway, the delivery side of the pipeline.
///
/// `deliver` must be safe to invoke repeatedly with identical arguments:
/// the retry protocol re-invokes it on failure.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn deliver(&self, chat_id: &str, artifact: &Artifact) -> Result<(), GatewayError>;
}

/// Fetch → render → deliver, invoked once per firing.
pub struct ReportPipeline<S, G> {
    source: S,
    gateway: G,
    retry: RetryPolicy,
}

impl<S: DataSource, G: Gateway> ReportPipeline<S, G> {
    pub fn new(source: S, gateway: G, retry: RetryPolicy) -> Self {
        Self {
            source,
            gateway,
            retry,
        }
    }

    /// Execute one firing of `job`.
    ///
    /// Fetch and auth failures abort the firing without retry; only the
    /// delivery step is retried. The returned error is for the job-body
    /// boundary to log; a firing's failure never crosses into scheduler
    /// control flow.
    pub async fn fire(&self, job: &JobSpec) -> Result<(), ReportError> {
        // UUIDv7 correlates the log lines of interleaved concurrent firings.
        let firing = Uuid::now_v7();
        let fired_at = Utc::now();
        info!(job = %job.report_id, %firing, "firing report job");

        let table = self.source.fetch(&job.report_id).await?;
        let artifact = render::render(&job.display_name, &job.report_id, &table, fired_at);
        deliver_with_retry(&self.retry, || self.gateway.deliver(&job.chat_id, &artifact)).await?;

        info!(
            job = %job.report_id,
            %firing,
            rows = table.row_count(),
            "report delivered"
        );
        Ok(())
    }
}
