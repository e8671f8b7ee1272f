use thiserror::Error;

/// Errors produced while classifying a job against the current time.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The job's time-of-day does not exist on the current calendar day
    /// in the local timezone (e.g. inside a DST transition gap).
    #[error("Unrepresentable local time {hour:02}:{minute:02}")]
    UnrepresentableTime { hour: u8, minute: u8 },
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
