//! Duration parsing, arithmetic, and formatting.
//!
//! Two spellings are accepted by one forward scan: ISO-8601-style
//! (`P1Y2M3DT4H5M6S`, `PT0.5S`) and bare shorthand (`1h2m3s`, `36h`). The
//! letter `M` is months in the date part and minutes in the time part; a
//! bare `NM` with nothing else pinning it down is read as minutes, since
//! that is what shorthand writers mean.
//!
//! [`parse_duration`] reduces to a fixed millisecond count and therefore
//! rejects year/month components: those are calendar-relative, and only
//! [`add_duration`]/[`subtract_duration`] can apply them, as true calendar
//! arithmetic against a concrete instant.

use chrono::{DateTime, Duration, Local, Months};

use crate::error::{ConvertError, Result};
use crate::zones::anchor_wall_clock;

/// Duration components as written, before any unit reduction. Presence is
/// tracked per field so that re-specification can be rejected and so that
/// `P0Y` still counts as "has a year component".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct DurationParts {
    years: Option<u64>,
    months: Option<u64>,
    days: Option<u64>,
    hours: Option<u64>,
    minutes: Option<u64>,
    seconds: Option<u64>,
    millis: u32,
}

impl DurationParts {
    /// Fixed milliseconds of the day-and-smaller fields.
    fn fixed_millis(&self, input: &str) -> Result<i64> {
        let total = self
            .days
            .unwrap_or(0)
            .checked_mul(86_400_000)
            .and_then(|ms| self.hours.unwrap_or(0).checked_mul(3_600_000)?.checked_add(ms))
            .and_then(|ms| self.minutes.unwrap_or(0).checked_mul(60_000)?.checked_add(ms))
            .and_then(|ms| self.seconds.unwrap_or(0).checked_mul(1000)?.checked_add(ms))
            .and_then(|ms| ms.checked_add(self.millis as u64))
            .filter(|ms| *ms <= i64::MAX as u64)
            .ok_or_else(|| ConvertError::OutOfRange(input.trim().to_string()))?;
        Ok(total as i64)
    }
}

/// Parse a duration string into a non-negative millisecond count.
///
/// # Errors
///
/// [`ConvertError::InvalidDuration`] on malformed syntax or when year/month
/// components are present, since they have no fixed millisecond value. Use
/// [`add_duration`] to apply those to an instant instead.
///
/// # Examples
///
/// ```
/// use loosetime::parse_duration;
///
/// assert_eq!(parse_duration("1h2m3s").unwrap(), 3_723_000);
/// assert_eq!(parse_duration("PT0.5S").unwrap(), 500);
/// assert!(parse_duration("P1M").is_err());
/// ```
pub fn parse_duration(input: &str) -> Result<i64> {
    let parts = parse_components(input)?;
    if parts.years.is_some() || parts.months.is_some() {
        return Err(bad(input));
    }
    parts.fixed_millis(input)
}

/// Add a duration string to an epoch-millisecond instant.
///
/// Year/month/day components move the local calendar (month lengths
/// respected, end-of-month clamped, wall-clock time preserved across DST);
/// hour and smaller components are fixed offsets. Components apply in
/// year → month → day → time order, each only if non-zero.
pub fn add_duration(millis: i64, duration: &str) -> Result<i64> {
    apply_duration(millis, duration, 1)
}

/// Subtract a duration string from an epoch-millisecond instant.
///
/// The mirror of [`add_duration`]. Note that month arithmetic does not
/// always invert: Jan 31 + 1 month clamps to Feb 28, and subtracting the
/// month again yields Jan 28.
pub fn subtract_duration(millis: i64, duration: &str) -> Result<i64> {
    apply_duration(millis, duration, -1)
}

fn apply_duration(instant: i64, input: &str, sign: i64) -> Result<i64> {
    let parts = parse_components(input)?;
    let overflow = || ConvertError::OutOfRange(input.trim().to_string());

    let year_months = parts.years.unwrap_or(0).checked_mul(12).ok_or_else(overflow)?;
    let months = parts.months.unwrap_or(0);
    let days = parts.days.unwrap_or(0);

    let mut out = instant;
    if year_months > 0 || months > 0 || days > 0 {
        let start = DateTime::from_timestamp_millis(instant)
            .ok_or_else(overflow)?
            .with_timezone(&Local);
        let mut naive = start.naive_local();
        // years and months are separate steps, each clamping on its own:
        // Feb 29 plus P1Y1M lands on Feb 28 and then Mar 28, not Mar 29
        for step in [year_months, months] {
            if step == 0 {
                continue;
            }
            let step = u32::try_from(step).map_err(|_| overflow())?;
            naive = if sign > 0 {
                naive.checked_add_months(Months::new(step))
            } else {
                naive.checked_sub_months(Months::new(step))
            }
            .ok_or_else(overflow)?;
        }
        if days > 0 {
            let days = i64::try_from(days).map_err(|_| overflow())?;
            let delta = Duration::try_days(sign * days).ok_or_else(overflow)?;
            naive = naive.checked_add_signed(delta).ok_or_else(overflow)?;
        }
        out = anchor_wall_clock(&Local, naive)
            .ok_or_else(overflow)?
            .timestamp_millis();
    }

    let sub_day = DurationParts {
        hours: parts.hours,
        minutes: parts.minutes,
        seconds: parts.seconds,
        millis: parts.millis,
        ..DurationParts::default()
    }
    .fixed_millis(input)?;
    out.checked_add(sign.checked_mul(sub_day).ok_or_else(overflow)?)
        .ok_or_else(overflow)
}

/// Format a millisecond count as shorthand (`1d0h3m4s`).
///
/// Zero is `"0s"`; negatives format the absolute value behind a `-`, with
/// `i64::MIN` rendered one millisecond short rather than overflowing on
/// negation. Units print from the largest non-zero one downward, keeping
/// interior zeros so the string stays positional, and milliseconds appear
/// as a 3-digit fraction of the seconds field only when non-zero.
pub fn format_duration(millis: i64) -> String {
    if millis == 0 {
        return "0s".to_string();
    }
    if millis < 0 {
        let magnitude = millis.checked_abs().unwrap_or(i64::MAX);
        return format!("-{}", format_duration(magnitude));
    }

    let ms = millis % 1000;
    let total = millis / 1000;
    let sec = total % 60;
    let min = total / 60 % 60;
    let hour = total / 3600 % 24;
    let day = total / 86_400;

    let mut out = String::new();
    if day != 0 {
        out.push_str(&format!("{day}d"));
    }
    if hour != 0 || !out.is_empty() {
        out.push_str(&format!("{hour}h"));
    }
    if min != 0 || !out.is_empty() {
        out.push_str(&format!("{min}m"));
    }
    if ms != 0 {
        out.push_str(&format!("{sec}.{ms:03}s"));
    } else {
        out.push_str(&format!("{sec}s"));
    }
    out
}

// ── Component scanner ───────────────────────────────────────────────────────

fn bad(input: &str) -> ConvertError {
    ConvertError::InvalidDuration(input.trim().to_string())
}

/// One forward pass: digits accumulate into a pending literal, a unit letter
/// commits it. Field order and the month/minute reading of `M` follow the
/// markers seen so far; a decimal point is legal only in the literal that the
/// trailing `S` commits.
fn parse_components(input: &str) -> Result<DurationParts> {
    let s = input.trim();
    if s.is_empty() {
        return Err(bad(input));
    }

    let mut parts = DurationParts::default();
    let mut saw_p = false;
    let mut saw_t = false;
    let mut finished = false;
    let mut tentative_minutes = false;
    let mut buf = String::new();
    let mut any_field = false;

    for (i, ch) in s.char_indices() {
        if finished {
            return Err(bad(input)); // S closes the string
        }
        match ch {
            '0'..='9' => buf.push(ch),
            '.' => {
                if buf.contains('.') {
                    return Err(bad(input));
                }
                buf.push(ch);
            }
            'p' | 'P' if i == 0 => saw_p = true,
            't' | 'T' => {
                if saw_t || !buf.is_empty() {
                    return Err(bad(input));
                }
                saw_t = true;
            }
            _ => {
                let (whole, frac) = commit_literal(&mut buf, input)?;
                let field = match ch.to_ascii_uppercase() {
                    'Y' if !saw_t => &mut parts.years,
                    'D' if !saw_t => &mut parts.days,
                    'H' => &mut parts.hours,
                    'M' => {
                        if saw_t || parts.days.is_some() || parts.hours.is_some() {
                            &mut parts.minutes
                        } else {
                            // month for now; revisited once the scan ends
                            tentative_minutes = !saw_p && parts.years.is_none();
                            &mut parts.months
                        }
                    }
                    'S' => {
                        finished = true;
                        parts.millis = frac.unwrap_or(0);
                        &mut parts.seconds
                    }
                    _ => return Err(bad(input)),
                };
                if frac.is_some() && !finished {
                    return Err(bad(input)); // decimal only before the trailing S
                }
                if field.is_some() {
                    return Err(bad(input)); // field given twice
                }
                *field = Some(whole);
                any_field = true;
            }
        }
    }

    if !buf.is_empty() || !any_field {
        return Err(bad(input));
    }

    // a bare `NM` with nothing else disambiguating it means minutes
    if tentative_minutes {
        if let Some(value) = parts.months.take() {
            if parts.minutes.is_some() {
                return Err(bad(input));
            }
            parts.minutes = Some(value);
        }
    }

    Ok(parts)
}

/// Take the pending numeric literal: whole part plus fractional milliseconds
/// (truncated past 3 digits).
fn commit_literal(buf: &mut String, input: &str) -> Result<(u64, Option<u32>)> {
    if buf.is_empty() {
        return Err(bad(input));
    }
    let text = std::mem::take(buf);
    let (whole_str, frac_str) = match text.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (text.as_str(), None),
    };
    let whole: u64 = if whole_str.is_empty() {
        0
    } else {
        whole_str.parse().map_err(|_| bad(input))?
    };
    let frac = match frac_str {
        None => None,
        Some("") => return Err(bad(input)),
        Some(digits) => {
            let mut millis = 0u32;
            let mut scale = 100;
            for d in digits.bytes().take(3) {
                millis += (d - b'0') as u32 * scale;
                scale /= 10;
            }
            Some(millis)
        }
    };
    Ok((whole, frac))
}

// ── Tests ───────────────────────────────────────────────────────────────────

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

    // ── parsing ─────────────────────────────────────────────────────────

    #[test]
    fn test_parse_shorthand() {
        assert_eq!(parse_duration("1h2m3s").unwrap(), 3_723_000);
        assert_eq!(parse_duration("36h").unwrap(), 129_600_000);
        assert_eq!(parse_duration("1d0h0m0s").unwrap(), 86_400_000);
    }

    #[test]
    fn test_parse_iso_shape() {
        assert_eq!(parse_duration("P1DT2H3M4S").unwrap(), 93_784_000);
        assert_eq!(parse_duration("PT5M").unwrap(), 300_000);
        assert_eq!(parse_duration("P3D").unwrap(), 259_200_000);
        assert_eq!(parse_duration("PT0S").unwrap(), 0);
    }

    #[test]
    fn test_bare_m_means_minutes() {
        assert_eq!(parse_duration("5m").unwrap(), 300_000);
        assert_eq!(parse_duration("2m3s").unwrap(), 123_000);
        // with D or H in front, M is minutes by position
        assert_eq!(parse_duration("1d5m").unwrap(), 86_700_000);
    }

    #[test]
    fn test_calendar_components_rejected() {
        assert!(parse_duration("P1M").is_err());
        assert!(parse_duration("P1Y").is_err());
        assert!(parse_duration("P1Y2M3D").is_err());
        // presence is what matters, not magnitude
        assert!(parse_duration("P0Y").is_err());
    }

    #[test]
    fn test_fractional_seconds() {
        assert_eq!(parse_duration("1.5s").unwrap(), 1_500);
        assert_eq!(parse_duration("PT0.5S").unwrap(), 500);
        assert_eq!(parse_duration("0.123456s").unwrap(), 123);
        assert_eq!(parse_duration(".5s").unwrap(), 500);
    }

    #[test]
    fn test_decimal_only_before_trailing_s() {
        assert!(parse_duration("1.5m").is_err());
        assert!(parse_duration("1.5h2s").is_err());
        assert!(parse_duration("1..5s").is_err());
        assert!(parse_duration("1.s").is_err());
    }

    #[test]
    fn test_seconds_must_be_final() {
        assert!(parse_duration("3s2m").is_err());
        assert!(parse_duration("1s1s").is_err());
    }

    #[test]
    fn test_respecified_field_rejected() {
        assert!(parse_duration("1h2h").is_err());
        assert!(parse_duration("P1M2M").is_err());
        assert!(parse_duration("5m1h2m").is_err());
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("P").is_err());
        assert!(parse_duration("PT").is_err());
        assert!(parse_duration("1h2").is_err());
        assert!(parse_duration("h").is_err());
        assert!(parse_duration("1x").is_err());
        assert!(parse_duration("1w").is_err());
    }

    #[test]
    fn test_overflow_is_an_error_not_a_panic() {
        assert!(parse_duration("999999999999999999d").is_err());
        assert!(add_duration(0, "9999999999999999d").is_err());
    }

    #[test]
    fn test_error_carries_input() {
        match parse_duration("P1M") {
            Err(ConvertError::InvalidDuration(s)) => assert_eq!(s, "P1M"),
            other => panic!("expected InvalidDuration, got {other:?}"),
        }
    }

    // ── formatting ──────────────────────────────────────────────────────

    #[test]
    fn test_format_zero_and_negative() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(-1000), "-1s");
        assert_eq!(format_duration(1000), "1s");
    }

    #[test]
    fn test_format_keeps_interior_zeros() {
        let ms = 86_400_000 + 3 * 60_000 + 4_000;
        assert_eq!(format_duration(ms), "1d0h3m4s");
        assert_eq!(format_duration(86_400_000), "1d0h0m0s");
        assert_eq!(format_duration(3_723_000), "1h2m3s");
    }

    #[test]
    fn test_format_millis_as_fraction() {
        assert_eq!(format_duration(500), "0.500s");
        assert_eq!(format_duration(3_723_007), "1h2m3.007s");
    }

    #[test]
    fn test_format_most_negative_value() {
        // |i64::MIN| is not representable; it prints one millisecond short
        let rendered = format_duration(i64::MIN);
        assert_eq!(rendered, format!("-{}", format_duration(i64::MAX)));
    }

    #[test]
    fn test_format_parse_round_trip() {
        for ms in [0, 1, 999, 1000, 59_999, 3_723_000, 86_400_000, 90_061_001] {
            assert_eq!(parse_duration(&format_duration(ms)).unwrap(), ms, "{ms}");
        }
    }

    // ── calendar arithmetic ─────────────────────────────────────────────

    #[test]
    fn test_add_fixed_components() {
        let t = local_ms(2001, 2, 3, 4, 5, 6);
        assert_eq!(add_duration(t, "1h2m3s").unwrap(), t + 3_723_000);
        assert_eq!(subtract_duration(t, "1h2m3s").unwrap(), t - 3_723_000);
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        let jan31 = local_ms(2001, 1, 31, 10, 0, 0);
        assert_eq!(add_duration(jan31, "P1M").unwrap(), local_ms(2001, 2, 28, 10, 0, 0));
    }

    #[test]
    fn test_add_year_clamps_leap_day() {
        let leap = local_ms(2000, 2, 29, 12, 0, 0);
        assert_eq!(add_duration(leap, "P1Y").unwrap(), local_ms(2001, 2, 28, 12, 0, 0));
    }

    #[test]
    fn test_year_and_month_clamp_independently() {
        // the year step clamps Feb 29 to Feb 28 before the month step runs
        let leap = local_ms(2000, 2, 29, 12, 0, 0);
        assert_eq!(
            add_duration(leap, "P1Y1M").unwrap(),
            local_ms(2001, 3, 28, 12, 0, 0)
        );
    }

    #[test]
    fn test_add_days_preserves_wall_clock() {
        let t = local_ms(2001, 2, 3, 9, 30, 0);
        assert_eq!(add_duration(t, "P7D").unwrap(), local_ms(2001, 2, 10, 9, 30, 0));
    }

    #[test]
    fn test_add_subtract_round_trip() {
        let t = local_ms(2001, 2, 3, 4, 5, 6);
        for d in ["1h2m3s", "P2D", "PT90M", "45s"] {
            assert_eq!(add_duration(subtract_duration(t, d).unwrap(), d).unwrap(), t, "{d}");
        }
    }

    #[test]
    fn test_month_round_trip_known_failure() {
        // Jan 31 + 1 month clamps; the subtraction cannot recover the 31st
        let jan31 = local_ms(2001, 1, 31, 10, 0, 0);
        let there_and_back =
            subtract_duration(add_duration(jan31, "P1M").unwrap(), "P1M").unwrap();
        assert_eq!(there_and_back, local_ms(2001, 1, 28, 10, 0, 0));
    }
}
