//! Execution-mode classification — the decision at the heart of the scheduler.

use chrono::{DateTime, TimeZone};

use herald_core::{JobSpec, ScheduleTuning};

use crate::error::{Result, SchedulerError};

/// How a job will be executed, decided once per process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Re-run every `every_mins` minutes.
    Recurring { every_mins: u32 },
    /// Run now, exactly once: the daily trigger passed within the
    /// catch-up window.
    ImmediateOnce,
    /// Run every day at the given wall-clock time.
    ScheduledOnce { hour: u8, minute: u8 },
}

/// Classify `job` against `now`. First matching rule wins:
///
/// 1. A recurrence interval at least as coarse as the ignore threshold is
///    honoured as genuinely periodic. Shorter intervals would fire needlessly
///    often relative to the data's refresh cadence and fall through to the
///    daily rules.
/// 2. A trigger time that already passed today, by no more than the catch-up
///    window, still runs today instead of waiting until tomorrow.
/// 3. Everything else waits for its daily HH:MM slot.
///
/// A trigger time still ahead today is never run early: only a non-negative
/// delay qualifies for catch-up.
pub fn classify<Tz: TimeZone>(
    job: &JobSpec,
    now: DateTime<Tz>,
    tuning: &ScheduleTuning,
) -> Result<ExecutionMode> {
    if let Some(every_mins) = job.every_mins {
        if every_mins >= tuning.ignore_threshold_mins {
            return Ok(ExecutionMode::Recurring { every_mins });
        }
    }

    let hour = job.time.hour;
    let minute = job.time.minute;
    let unrepresentable = || SchedulerError::UnrepresentableTime { hour, minute };

    // today's calendar date combined with the job's trigger time
    let naive = now
        .date_naive()
        .and_hms_opt(u32::from(hour), u32::from(minute), 0)
        .ok_or_else(unrepresentable)?;
    let job_time = now
        .timezone()
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(unrepresentable)?;

    // whole minutes; negative when the trigger time is still ahead today
    let delay_mins = (now - job_time).num_minutes();

    if (0..=i64::from(tuning.catch_up_mins)).contains(&delay_mins) {
        Ok(ExecutionMode::ImmediateOnce)
    } else {
        Ok(ExecutionMode::ScheduledOnce { hour, minute })
    }
}
