//! Time helpers.

use std::time::SystemTime;

use chrono::{DateTime, Utc};

/// Convert a [`SystemTime`] (typically a file modification time) to epoch
/// seconds as carried in sensor readings.
#[must_use]
pub fn epoch_seconds(time: SystemTime) -> i64 {
    DateTime::<Utc>::from(time).timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn should_convert_epoch_origin_to_zero() {
        assert_eq!(epoch_seconds(UNIX_EPOCH), 0);
    }

    #[test]
    fn should_truncate_subsecond_precision() {
        let time = UNIX_EPOCH + Duration::from_millis(1_700_000_000_500);
        assert_eq!(epoch_seconds(time), 1_700_000_000);
    }
}
