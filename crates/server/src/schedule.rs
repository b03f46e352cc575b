// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Daily conflict scan.
//!
//! Once a day, at a fixed UTC hour, every school is scanned and each
//! admin receives a conflict summary on the live stream.

use autosub::NoticeSink;
use autosub_api::{ScanResponse, WithNotices, run_conflict_scan};
use time::{Duration, OffsetDateTime, Time};
use tracing::{error, info, warn};

use crate::AppState;

/// The first instant at `hour:00` UTC strictly after `now`.
///
/// # Errors
///
/// Returns an error if `hour` is not a valid hour of the day.
pub fn next_run_after(
    now: OffsetDateTime,
    hour: u8,
) -> Result<OffsetDateTime, time::error::ComponentRange> {
    let now: OffsetDateTime = now.to_offset(time::UtcOffset::UTC);
    let today: OffsetDateTime = now.replace_time(Time::from_hms(hour, 0, 0)?);
    if today > now {
        Ok(today)
    } else {
        Ok(today + Duration::DAY)
    }
}

/// Runs one scan and publishes the resulting notices.
pub async fn scan_once(app_state: &AppState) {
    let result = {
        let mut persistence = app_state.persistence.lock().await;
        run_conflict_scan(&mut persistence)
    };

    match result {
        Ok(WithNotices {
            response,
            notices,
        }) => {
            log_scan(&response);
            app_state.live.publish_all(&notices);
        }
        Err(err) => error!(error = %err, "Daily conflict scan failed"),
    }
}

fn log_scan(response: &ScanResponse) {
    for failure in &response.failures {
        warn!(
            school_id = failure.school_id,
            error = %failure.message,
            "School skipped by conflict scan"
        );
    }
    info!(
        schools = response.reports.len(),
        failed = response.failures.len(),
        "Daily conflict scan finished"
    );
}

/// Sleeps until each scheduled hour and scans. Never returns unless the
/// hour is invalid.
pub async fn run_daily_scan(app_state: AppState, hour: u8) {
    loop {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let next: OffsetDateTime = match next_run_after(now, hour) {
            Ok(next) => next,
            Err(err) => {
                error!(hour, error = %err, "Invalid scan hour, daily scan disabled");
                return;
            }
        };
        info!(next_run = %next, "Next conflict scan scheduled");
        tokio::time::sleep((next - now).unsigned_abs()).await;

        scan_once(&app_state).await;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_next_run_is_later_today_before_the_hour() {
        let next: OffsetDateTime = next_run_after(datetime!(2026-03-02 06:30 UTC), 8).unwrap();
        assert_eq!(next, datetime!(2026-03-02 08:00 UTC));
    }

    #[test]
    fn test_next_run_is_tomorrow_at_or_after_the_hour() {
        assert_eq!(
            next_run_after(datetime!(2026-03-02 08:00 UTC), 8).unwrap(),
            datetime!(2026-03-03 08:00 UTC)
        );
        assert_eq!(
            next_run_after(datetime!(2026-03-31 23:59 UTC), 8).unwrap(),
            datetime!(2026-04-01 08:00 UTC)
        );
    }

    #[test]
    fn test_next_run_is_computed_in_utc() {
        let next: OffsetDateTime = next_run_after(datetime!(2026-03-02 07:30 +05:30), 8).unwrap();
        assert_eq!(next, datetime!(2026-03-02 08:00 UTC));
    }

    #[test]
    fn test_invalid_hour_is_an_error() {
        assert!(next_run_after(datetime!(2026-03-02 06:30 UTC), 24).is_err());
    }
}
