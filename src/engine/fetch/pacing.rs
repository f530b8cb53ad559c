use std::time::Duration;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Delay between report queries of a monthly run.
///
/// Incremental runs spread their queries so that no more than
/// `hourly_budget` land in any hour; full backfills use `step`.
pub fn monthly_pacing(
    total_connections: usize,
    hourly_budget: usize,
    incremental: bool,
    step: Duration,
) -> Duration {
    if !incremental {
        return step;
    }
    let spread = total_connections.max(hourly_budget).max(1);
    Duration::from_secs((SECONDS_PER_HOUR / spread as f64).ceil() as u64)
}
