//! Clock strings for the transport display.

use std::time::Duration;

/// Format a seconds value as `MM:SS`.
///
/// Not-a-number and negative inputs render as `00:00`, fractional
/// seconds truncate, and minutes keep growing past two digits instead
/// of rolling into hours.
pub fn format_clock(seconds: f64) -> String {
    if seconds.is_nan() || seconds < 0.0 {
        return "00:00".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

/// `format_clock` over an optional duration. `None` means the length is
/// not known yet and reads as `00:00`.
pub fn format_clock_opt(duration: Option<Duration>) -> String {
    match duration {
        Some(duration) => format_clock(duration.as_secs_f64()),
        None => "00:00".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_and_negative_render_zero() {
        assert_eq!(format_clock(f64::NAN), "00:00");
        assert_eq!(format_clock(-1.0), "00:00");
        assert_eq!(format_clock(-0.4), "00:00");
    }

    #[test]
    fn pads_and_truncates() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(7.9), "00:07");
        assert_eq!(format_clock(65.0), "01:05");
        assert_eq!(format_clock(3599.0), "59:59");
    }

    #[test]
    fn minutes_keep_growing_past_an_hour() {
        assert_eq!(format_clock(3600.0), "60:00");
        assert_eq!(format_clock(6000.0), "100:00");
    }

    #[test]
    fn unknown_duration_reads_as_zero() {
        assert_eq!(format_clock_opt(None), "00:00");
        assert_eq!(format_clock_opt(Some(Duration::from_secs(125))), "02:05");
    }
}
