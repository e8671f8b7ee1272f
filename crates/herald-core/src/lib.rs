//! `herald-core` — configuration, the job registry, and shared error types.

pub mod config;
pub mod error;
pub mod job;

pub use config::{HeraldConfig, JobConfig, RetryConfig, ScheduleTuning};
pub use error::{HeraldError, Result};
pub use job::{build_registry, JobSpec, TimeOfDay};
