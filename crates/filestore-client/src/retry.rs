//! Capped exponential backoff for write retries

use std::time::Duration;

/// Delay after the first failed attempt.
pub const INITIAL_DELAY: Duration = Duration::from_millis(1000);

/// Upper bound on any single delay.
pub const MAX_DELAY: Duration = Duration::from_millis(5000);

/// Delay to wait after failed attempt number `attempt` (1-based) before the
/// next one. Doubles each time, capped at [`MAX_DELAY`]: 1s, 2s, 4s, 5s, 5s...
///
/// Pure function of the attempt index; the caller owns the actual sleep.
pub fn backoff_delay(attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(31);
    let millis = (INITIAL_DELAY.as_millis() as u64) << exponent;
    Duration::from_millis(millis.min(MAX_DELAY.as_millis() as u64))
}
