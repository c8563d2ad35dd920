/// Microsecond timestamps, as counted by the RP2040 system timer
pub type Instant = fugit::TimerInstantU64<1_000_000>;
pub type Duration = fugit::MicrosDurationU64;

pub const LOOP_PERIOD_MS: u32 = 100; // 100ms ideally
pub const DEBOUNCE_DELAY: Duration = Duration::millis(150);
pub const ALARM_DURATION: Duration = Duration::millis(1000);

/// Time passed between two instants
/// A `now` that lies before `since` counts as no time passed
/// param since: The earlier instant
/// param now: The current instant
/// returns the elapsed Duration
pub fn elapsed(since: Instant, now: Instant) -> Duration {
    now.checked_duration_since(since)
        .unwrap_or(Duration::from_ticks(0))
}

/// Builds an Instant from milliseconds since boot
pub const fn instant_from_millis(ms: u64) -> Instant {
    Instant::from_ticks(ms * 1_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_counts_forward() {
        let since = instant_from_millis(200);
        let now = instant_from_millis(1_350);
        assert_eq!(elapsed(since, now), Duration::millis(1_150));
    }

    #[test]
    fn elapsed_saturates_when_clock_is_behind() {
        let since = instant_from_millis(500);
        let now = instant_from_millis(100);
        assert_eq!(elapsed(since, now), Duration::from_ticks(0));
    }

    #[test]
    fn alarm_outlasts_debounce() {
        assert!(ALARM_DURATION > DEBOUNCE_DELAY);
    }
}
