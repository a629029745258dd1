//! Round-trip properties across the parse and format surfaces.

use proptest::prelude::*;

use loosetime::{
    add_duration, format_duration, format_iso, parse_date_time, parse_duration,
    subtract_duration, MonthDayOrder,
};

// instants from the epoch through 2100, in milliseconds
const INSTANT_RANGE: std::ops::Range<i64> = 0..4_102_444_800_000;

proptest! {
    /// A full-precision ISO rendering survives a parse/format cycle exactly.
    /// Compared as strings so that fall-back fold times, where two instants
    /// share one wall-clock rendering, still count as equivalent.
    #[test]
    fn iso_full_precision_is_stable(ms in INSTANT_RANGE) {
        let rendered = format_iso(ms, true).unwrap();
        let parsed = parse_date_time(&rendered, MonthDayOrder::MonthDay, true).unwrap();
        prop_assert_eq!(format_iso(parsed, true).unwrap(), rendered);
    }

    /// Truncation only ever drops all-zero components, so the short
    /// rendering is just as stable as the full one.
    #[test]
    fn iso_truncated_is_stable(ms in INSTANT_RANGE) {
        let rendered = format_iso(ms, false).unwrap();
        let parsed = parse_date_time(&rendered, MonthDayOrder::MonthDay, true).unwrap();
        prop_assert_eq!(
            format_iso(parsed, false).unwrap(),
            rendered
        );
    }

    /// formatDuration is a section of parseDuration for every non-negative
    /// count expressible without year/month fields.
    #[test]
    fn duration_format_parse_round_trip(ms in 0i64..=1_000_000_000_000_000) {
        prop_assert_eq!(parse_duration(&format_duration(ms)).unwrap(), ms);
    }

    /// Fixed-offset durations always invert: add after subtract is identity.
    #[test]
    fn add_after_subtract_is_identity(
        t in INSTANT_RANGE,
        h in 0i64..200,
        m in 0i64..600,
        s in 0i64..600,
    ) {
        let dur = format!("{h}h{m}m{s}s");
        let shifted = subtract_duration(t, &dur).unwrap();
        prop_assert_eq!(add_duration(shifted, &dur).unwrap(), t);
        prop_assert_eq!(shifted, t - (h * 3_600_000 + m * 60_000 + s * 1_000));
    }

    /// The shorthand and ISO spellings of the same components agree.
    #[test]
    fn shorthand_and_iso_spellings_agree(
        d in 0u32..500,
        h in 0u32..24,
        m in 0u32..60,
        s in 0u32..60,
    ) {
        let shorthand = parse_duration(&format!("{d}d{h}h{m}m{s}s")).unwrap();
        let iso = parse_duration(&format!("P{d}DT{h}H{m}M{s}S")).unwrap();
        prop_assert_eq!(shorthand, iso);
    }
}
