//! Timer primitives — fixed-interval and daily time-of-day loops.
//!
//! Both loops are meant to be handed to `tokio::spawn` and run for the
//! lifetime of the process; there is no deregistration.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Datelike, Local, TimeZone};
use tracing::warn;

/// Next occurrence of HH:MM strictly after `from`.
///
/// Returns `None` when the candidate is not a representable local instant
/// (DST gap on the current day).
pub fn next_daily_occurrence<Tz: TimeZone>(
    from: &DateTime<Tz>,
    hour: u8,
    minute: u8,
) -> Option<DateTime<Tz>> {
    let candidate = from
        .timezone()
        .with_ymd_and_hms(
            from.year(),
            from.month(),
            from.day(),
            u32::from(hour),
            u32::from(minute),
            0,
        )
        .single()?;
    if candidate > *from {
        Some(candidate)
    } else {
        // Today's slot has passed — advance to tomorrow.
        Some(candidate + chrono::Duration::days(1))
    }
}

/// Drive `body` on a fixed interval. The first fire happens after one full
/// interval, not immediately.
pub async fn run_every<F, Fut>(every: Duration, mut body: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
    loop {
        interval.tick().await;
        body().await;
    }
}

/// Drive `body` every day at HH:MM local time.
///
/// The next slot is computed after each run completes, so a body that takes
/// longer than a day simply skips the slots it overran.
pub async fn run_daily_at<F, Fut>(hour: u8, minute: u8, mut body: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    loop {
        let now = Local::now();
        let Some(next) = next_daily_occurrence(&now, hour, minute) else {
            warn!(hour, minute, "no representable next occurrence today, retrying in an hour");
            tokio::time::sleep(Duration::from_secs(3600)).await;
            continue;
        };
        let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
        tokio::time::sleep(wait).await;
        body().await;
    }
}
