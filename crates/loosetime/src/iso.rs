//! Truncated ISO-8601 instant formatting.
//!
//! Built by hand, digit by digit, so output never depends on a locale and a
//! hot loop stamping timestamps does no work beyond one string allocation.

use chrono::{DateTime, Datelike, Local, Timelike};

use crate::error::{ConvertError, Result};

/// Format an epoch-millisecond instant as local wall time,
/// `yyyy-MM-dd[ HH:mm[:ss[.SSS]]]`.
///
/// With `full_precision` the time is always rendered through milliseconds.
/// Without it, trailing all-zero components drop off: milliseconds first,
/// then seconds, then the whole time-of-day when the instant is an exact
/// local midnight.
///
/// # Errors
///
/// [`ConvertError::OutOfRange`] for instants outside the representable
/// calendar or before year 1; BCE years have no ISO rendering here.
///
/// # Examples
///
/// ```
/// use chrono::{Local, TimeZone};
/// use loosetime::format_iso;
///
/// let t = Local.with_ymd_and_hms(2001, 2, 3, 4, 5, 0).unwrap();
/// let millis = t.timestamp_millis();
/// assert_eq!(format_iso(millis, false).unwrap(), "2001-02-03 04:05");
/// assert_eq!(format_iso(millis, true).unwrap(), "2001-02-03 04:05:00.000");
/// ```
pub fn format_iso(millis: i64, full_precision: bool) -> Result<String> {
    let instant = DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| ConvertError::OutOfRange(millis.to_string()))?;
    let wall = instant.with_timezone(&Local).naive_local();
    if wall.year() < 0 {
        return Err(ConvertError::OutOfRange(millis.to_string()));
    }

    let (hour, min, sec) = (wall.hour(), wall.minute(), wall.second());
    let subsec = wall.nanosecond() / 1_000_000;

    let mut out = String::with_capacity(23);
    push_padded(&mut out, wall.year() as u32, 4);
    out.push('-');
    push_padded(&mut out, wall.month(), 2);
    out.push('-');
    push_padded(&mut out, wall.day(), 2);

    let time_zero = hour == 0 && min == 0 && sec == 0 && subsec == 0;
    if !full_precision && time_zero {
        return Ok(out);
    }

    out.push(' ');
    push_padded(&mut out, hour, 2);
    out.push(':');
    push_padded(&mut out, min, 2);

    if !full_precision && sec == 0 && subsec == 0 {
        return Ok(out);
    }
    out.push(':');
    push_padded(&mut out, sec, 2);

    if !full_precision && subsec == 0 {
        return Ok(out);
    }
    out.push('.');
    push_padded(&mut out, subsec, 3);
    Ok(out)
}

/// Append `value` zero-padded to at least `width` digits.
fn push_padded(out: &mut String, value: u32, width: u32) {
    let digits = {
        let mut n = value;
        let mut count = 1;
        while n >= 10 {
            n /= 10;
            count += 1;
        }
        count
    };
    for _ in digits..width {
        out.push('0');
    }
    let mut divisor = 10u32.pow(digits - 1);
    while divisor > 0 {
        out.push((b'0' + (value / divisor % 10) as u8) as char);
        divisor /= 10;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local_ms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
        Local
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn test_full_precision_always_renders_millis() {
        let t = local_ms(2001, 2, 3, 4, 5, 6) + 7;
        assert_eq!(format_iso(t, true).unwrap(), "2001-02-03 04:05:06.007");
        let midnight = local_ms(2001, 2, 3, 0, 0, 0);
        assert_eq!(format_iso(midnight, true).unwrap(), "2001-02-03 00:00:00.000");
    }

    #[test]
    fn test_truncates_trailing_zero_components() {
        assert_eq!(
            format_iso(local_ms(2001, 2, 3, 0, 0, 0), false).unwrap(),
            "2001-02-03"
        );
        assert_eq!(
            format_iso(local_ms(2001, 2, 3, 4, 5, 0), false).unwrap(),
            "2001-02-03 04:05"
        );
        assert_eq!(
            format_iso(local_ms(2001, 2, 3, 4, 5, 6), false).unwrap(),
            "2001-02-03 04:05:06"
        );
        assert_eq!(
            format_iso(local_ms(2001, 2, 3, 4, 5, 6) + 120, false).unwrap(),
            "2001-02-03 04:05:06.120"
        );
    }

    #[test]
    fn test_interior_zeros_are_kept() {
        // a zero minute does not truncate while seconds are non-zero
        assert_eq!(
            format_iso(local_ms(2001, 2, 3, 4, 0, 6), false).unwrap(),
            "2001-02-03 04:00:06"
        );
    }

    #[test]
    fn test_zero_pads_small_years() {
        let t = local_ms(800, 2, 3, 0, 0, 0);
        assert_eq!(format_iso(t, false).unwrap(), "0800-02-03");
    }

    #[test]
    fn test_bce_years_rejected() {
        // roughly 26 BCE
        assert!(format_iso(-63_000_000_000_000, false).is_err());
    }
}
