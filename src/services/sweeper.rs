//! Background sweeper for rejected loan requests.
//!
//! Rejected requests are ephemeral: a periodic task deletes any rejected
//! row last touched before the retention cutoff. Running as a sweep over
//! the table (instead of a per-request timer) makes the cleanup
//! restart-safe and idempotent; a sweep that finds nothing is a no-op.

use chrono::{DateTime, Duration, Utc};

use crate::{config::LoansConfig, repository::Repository};

/// The point in time before which rejected loans are purged.
pub fn purge_cutoff(now: DateTime<Utc>, retention_minutes: u64) -> DateTime<Utc> {
    now - Duration::minutes(retention_minutes as i64)
}

/// Run the sweep loop forever. Errors are logged and the loop continues;
/// nothing here is load-bearing for correctness of the state machine.
pub async fn run(repository: Repository, config: LoansConfig) {
    let mut interval =
        tokio::time::interval(std::time::Duration::from_secs(config.sweep_interval_seconds.max(1)));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    tracing::info!(
        retention_minutes = config.rejected_retention_minutes,
        interval_seconds = config.sweep_interval_seconds,
        "Rejected-loan sweeper started"
    );

    loop {
        interval.tick().await;

        let cutoff = purge_cutoff(Utc::now(), config.rejected_retention_minutes);
        match repository.peminjaman.purge_rejected_before(cutoff).await {
            Ok(0) => {}
            Ok(purged) => {
                tracing::info!(purged, "Purged rejected loan requests");
            }
            Err(e) => {
                tracing::warn!("Rejected-loan sweep failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn cutoff_is_retention_window_behind_now() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let cutoff = purge_cutoff(now, 5);
        assert_eq!(cutoff, Utc.with_ymd_and_hms(2024, 1, 1, 11, 55, 0).unwrap());

        // a record rejected 6 minutes ago falls before the cutoff
        let rejected_at = Utc.with_ymd_and_hms(2024, 1, 1, 11, 54, 0).unwrap();
        assert!(rejected_at < cutoff);

        // one rejected 4 minutes ago survives this sweep
        let recent = Utc.with_ymd_and_hms(2024, 1, 1, 11, 56, 0).unwrap();
        assert!(recent > cutoff);
    }

    #[test]
    fn zero_retention_purges_everything_already_rejected() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(purge_cutoff(now, 0), now);
    }
}
