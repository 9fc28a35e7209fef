//! Time and duration conversion utilities.
//!
//! Provides the `MM:SS` display format used for elapsed time and episode
//! durations, plus saturating conversions for [`Duration`].

use std::time::Duration;

/// Format whole seconds as `MM:SS`.
///
/// Both fields are zero-padded to two digits. Minutes are not wrapped into
/// hours, so an episode of exactly one hour renders as `60:00`.
#[must_use]
pub fn format_time(total_secs: u64) -> String {
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format an optional number of seconds, rendering `None` as `00:00`.
#[must_use]
pub fn format_optional_time(total_secs: Option<u64>) -> String {
    format_time(total_secs.unwrap_or(0))
}

/// Extension trait for safe Duration conversions.
pub trait DurationExt {
    /// Convert duration to milliseconds as u64, saturating at `u64::MAX`.
    fn as_millis_u64(&self) -> u64;

    /// Convert duration to seconds as u32, saturating at `u32::MAX`.
    ///
    /// `u32::MAX` seconds is approximately 136 years.
    fn as_secs_u32(&self) -> u32;

    /// Whole elapsed seconds, discarding the sub-second part.
    fn whole_secs(&self) -> u64;
}

impl DurationExt for Duration {
    fn as_millis_u64(&self) -> u64 {
        u64::try_from(self.as_millis()).unwrap_or(u64::MAX)
    }

    fn as_secs_u32(&self) -> u32 {
        u32::try_from(self.as_secs()).unwrap_or(u32::MAX)
    }

    fn whole_secs(&self) -> u64 {
        self.as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_zero() {
        assert_eq!(format_time(0), "00:00");
    }

    #[test]
    fn test_format_time_pads_both_fields() {
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(9), "00:09");
    }

    #[test]
    fn test_format_time_last_second_of_hour() {
        assert_eq!(format_time(3599), "59:59");
    }

    #[test]
    fn test_format_time_does_not_wrap_minutes() {
        assert_eq!(format_time(3600), "60:00");
        assert_eq!(format_time(6000 * 60 + 1), "6000:01");
    }

    #[test]
    fn test_format_optional_time_none() {
        assert_eq!(format_optional_time(None), "00:00");
        assert_eq!(format_optional_time(Some(125)), "02:05");
    }

    #[test]
    fn test_as_millis_u64() {
        let duration = Duration::from_millis(1234);
        assert_eq!(duration.as_millis_u64(), 1234);
    }

    #[test]
    fn test_as_secs_u32_large() {
        let duration = Duration::from_secs(u64::from(u32::MAX) + 1);
        assert_eq!(duration.as_secs_u32(), u32::MAX);
    }

    #[test]
    fn test_whole_secs_floors() {
        assert_eq!(Duration::from_millis(65_999).whole_secs(), 65);
        assert_eq!(Duration::ZERO.whole_secs(), 0);
    }
}
