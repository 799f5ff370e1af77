//! Time utility functions

use std::time::Duration;

/// Convert duration to whole milliseconds, truncating
pub fn duration_to_ms(duration: Duration) -> u128 {
    duration.as_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_to_ms_truncates() {
        assert_eq!(duration_to_ms(Duration::from_micros(1_999)), 1);
        assert_eq!(duration_to_ms(Duration::from_secs(2)), 2_000);
        assert_eq!(duration_to_ms(Duration::ZERO), 0);
    }
}
