//! Activation — classify each registry entry once and hand it to a timer
//! or run it immediately.

use std::future::Future;
use std::time::Duration;

use chrono::Local;
use tracing::{error, info};

use herald_core::{JobSpec, ScheduleTuning};

use crate::classify::{classify, ExecutionMode};
use crate::timer;

/// Classify every job against the current time and spawn its execution task.
///
/// Each job is evaluated exactly once per process lifetime. A job that fails
/// to classify is logged and skipped without affecting the rest of the
/// registry. Jobs execute independently of each other; `run` is the job body
/// and must catch its own errors.
///
/// Returns the number of jobs activated.
pub fn activate_all<F, Fut>(jobs: &[JobSpec], tuning: &ScheduleTuning, run: F) -> usize
where
    F: Fn(JobSpec) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let now = Local::now();
    let mut activated = 0;
    for job in jobs {
        match classify(job, now, tuning) {
            Ok(mode) => {
                activate(job.clone(), mode, run.clone());
                activated += 1;
            }
            Err(e) => {
                error!(job = %job.report_id, error = %e, "job not schedulable");
            }
        }
    }
    activated
}

fn activate<F, Fut>(job: JobSpec, mode: ExecutionMode, run: F)
where
    F: Fn(JobSpec) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    match mode {
        ExecutionMode::Recurring { every_mins } => {
            info!(job = %job.report_id, every_mins, "job activated: recurring");
            let every = Duration::from_secs(u64::from(every_mins) * 60);
            tokio::spawn(async move {
                timer::run_every(every, move || run(job.clone())).await;
            });
        }
        ExecutionMode::ImmediateOnce => {
            info!(job = %job.report_id, "job activated: immediate catch-up run");
            tokio::spawn(run(job));
        }
        ExecutionMode::ScheduledOnce { hour, minute } => {
            info!(job = %job.report_id, time = %job.time, "job activated: daily");
            tokio::spawn(async move {
                timer::run_daily_at(hour, minute, move || run(job.clone())).await;
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use herald_core::TimeOfDay;
    use tokio::sync::mpsc;

    fn tuning() -> ScheduleTuning {
        ScheduleTuning {
            ignore_threshold_mins: 30,
            catch_up_mins: 15,
        }
    }

    #[tokio::test]
    async fn immediate_job_body_runs() {
        // A job whose trigger time is the current minute classifies as
        // ImmediateOnce and its body fires right away.
        let now = Local::now();
        let job = JobSpec {
            report_id: "sales-daily".into(),
            chat_id: "-100200300".into(),
            display_name: "Daily sales".into(),
            time: TimeOfDay {
                hour: now.hour() as u8,
                minute: now.minute() as u8,
            },
            every_mins: None,
        };

        let (tx, mut rx) = mpsc::channel::<String>(1);
        let activated = activate_all(&[job], &tuning(), move |spec| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(spec.report_id).await;
            }
        });
        assert_eq!(activated, 1);

        let fired = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("job body did not run")
            .expect("channel closed");
        assert_eq!(fired, "sales-daily");
    }

    #[tokio::test]
    async fn scheduled_job_does_not_fire_immediately() {
        // A trigger far outside the catch-up window waits for its daily slot.
        let now = Local::now();
        let job = JobSpec {
            report_id: "inventory".into(),
            chat_id: "-100200300".into(),
            display_name: "Inventory".into(),
            // 12 hours away from now, in either direction of midnight
            time: TimeOfDay {
                hour: ((now.hour() + 12) % 24) as u8,
                minute: 0,
            },
            every_mins: None,
        };

        let (tx, mut rx) = mpsc::channel::<String>(1);
        let activated = activate_all(&[job], &tuning(), move |spec| {
            let tx = tx.clone();
            async move {
                let _ = tx.send(spec.report_id).await;
            }
        });
        assert_eq!(activated, 1);

        let fired = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
        assert!(fired.is_err(), "daily job fired before its slot");
    }
}
