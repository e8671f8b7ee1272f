//! Job registry — the immutable list of configured report jobs.
//!
//! Built once at startup from [`crate::config::JobConfig`] entries and never
//! mutated afterwards, so concurrently firing jobs can share it without locks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::JobConfig;
use crate::error::HeraldError;

/// Wall-clock trigger time, 24-hour local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl FromStr for TimeOfDay {
    type Err = String;

    /// Parse "HH:MM". Hour must be 0..=23, minute 0..=59.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| format!("expected HH:MM, got '{s}'"))?;
        let hour: u8 = h
            .trim()
            .parse()
            .map_err(|_| format!("non-numeric hour in '{s}'"))?;
        let minute: u8 = m
            .trim()
            .parse()
            .map_err(|_| format!("non-numeric minute in '{s}'"))?;
        if hour > 23 {
            return Err(format!("hour out of range in '{s}'"));
        }
        if minute > 59 {
            return Err(format!("minute out of range in '{s}'"));
        }
        Ok(Self { hour, minute })
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A validated, immutable job definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    /// Identifier the report API understands.
    pub report_id: String,
    /// Delivery target chat.
    pub chat_id: String,
    /// Label used in rendered output.
    pub display_name: String,
    /// Daily trigger time.
    pub time: TimeOfDay,
    /// Recurrence interval in minutes. `None` means "run once daily at `time`".
    pub every_mins: Option<u32>,
}

impl JobSpec {
    /// Validate one raw config entry.
    pub fn from_config(cfg: &JobConfig) -> crate::error::Result<Self> {
        let time = cfg.time.parse().map_err(|reason| HeraldError::InvalidJob {
            job: cfg.report.clone(),
            reason,
        })?;
        // zero interval is "not recurring"
        let every_mins = cfg.every_mins.filter(|&n| n > 0);
        Ok(Self {
            report_id: cfg.report.clone(),
            chat_id: cfg.chat_id.clone(),
            display_name: cfg.name.clone(),
            time,
            every_mins,
        })
    }
}

/// Build the registry from raw config entries.
///
/// A malformed entry is logged and skipped; it must not prevent the other
/// jobs from being scheduled.
pub fn build_registry(jobs: &[JobConfig]) -> Vec<JobSpec> {
    let mut specs = Vec::with_capacity(jobs.len());
    for cfg in jobs {
        match JobSpec::from_config(cfg) {
            Ok(spec) => specs.push(spec),
            Err(e) => warn!(job = %cfg.report, error = %e, "skipping misconfigured job"),
        }
    }
    specs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job_config(time: &str, every_mins: Option<u32>) -> JobConfig {
        JobConfig {
            report: "sales-daily".into(),
            chat_id: "-100200300".into(),
            name: "Daily sales".into(),
            time: time.into(),
            every_mins,
        }
    }

    #[test]
    fn parses_valid_time() {
        let t: TimeOfDay = "09:05".parse().unwrap();
        assert_eq!(t, TimeOfDay { hour: 9, minute: 5 });
        assert_eq!(t.to_string(), "09:05");
    }

    #[test]
    fn rejects_out_of_range_time() {
        assert!("24:00".parse::<TimeOfDay>().is_err());
        assert!("12:60".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn rejects_non_numeric_time() {
        assert!("nine:00".parse::<TimeOfDay>().is_err());
        assert!("0900".parse::<TimeOfDay>().is_err());
        assert!("".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn zero_interval_is_not_recurring() {
        let spec = JobSpec::from_config(&job_config("09:00", Some(0))).unwrap();
        assert_eq!(spec.every_mins, None);
    }

    #[test]
    fn positive_interval_is_kept() {
        let spec = JobSpec::from_config(&job_config("09:00", Some(60))).unwrap();
        assert_eq!(spec.every_mins, Some(60));
    }

    #[test]
    fn registry_skips_bad_entries_and_keeps_the_rest() {
        let jobs = vec![
            job_config("08:30", None),
            job_config("25:99", None),
            job_config("17:45", Some(120)),
        ];
        let registry = build_registry(&jobs);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry[0].time, TimeOfDay { hour: 8, minute: 30 });
        assert_eq!(registry[1].every_mins, Some(120));
    }
}
