//! `herald-scheduler` — the scheduling decision engine.
//!
//! Each configured job is classified exactly once at startup into one of
//! three execution modes, then handed to a timer task or run immediately:
//!
//! | Mode            | Behaviour                                               |
//! |-----------------|---------------------------------------------------------|
//! | `Recurring`     | Re-run every N minutes                                  |
//! | `ImmediateOnce` | Run now: the daily trigger passed within the grace window |
//! | `ScheduledOnce` | Run every day at HH:MM local time                       |

pub mod classify;
pub mod engine;
pub mod error;
pub mod timer;

pub use classify::{classify, ExecutionMode};
pub use engine::activate_all;
pub use error::{Result, SchedulerError};
