//! Daily run-time calculation for the scheduled pass.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Duration, NaiveTime, Utc};

/// Next occurrence of `hour:minute` UTC strictly after `now`.
pub fn next_run_after(now: DateTime<Utc>, hour: u32, minute: u32) -> Result<DateTime<Utc>> {
    let at = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| anyhow!("invalid schedule time {hour:02}:{minute:02}"))?;

    let today = now.date_naive().and_time(at).and_utc();
    if today > now {
        Ok(today)
    } else {
        Ok(today + Duration::days(1))
    }
}
