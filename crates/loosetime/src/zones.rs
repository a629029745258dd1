//! Timezone token vocabulary.
//!
//! The scanner recognizes a deliberately small set of zone spellings: the
//! legacy US abbreviations at their fixed historical offsets, a handful of
//! European zones, and (inside parenthesized annotations) full names and
//! IANA identifiers. WET/CET/EET resolve through the tz database and follow
//! DST; their summer spellings WEST/CEST/EEST stay pinned at the summer
//! offset year-round. That asymmetry is intentional and load-bearing for
//! inputs produced by systems that emit the summer names literally.

use chrono::{DateTime, Duration, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// A zone as recognized in the input, before composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ZoneToken {
    /// Constant UTC offset in minutes east, never DST-adjusted.
    Fixed { minutes: i32 },
    /// A tz-database zone with calendar-dependent offset.
    Named(Tz),
}

const fn fixed(minutes: i32) -> ZoneToken {
    ZoneToken::Fixed { minutes }
}

/// Abbreviations the scanner accepts as bare words, in lookup order.
/// Shorter entries come before longer ones sharing a prefix so that a
/// two-letter prefix like `ce` resolves to CET, not CEST.
pub(crate) const ZONE_ABBREVIATIONS: &[(&str, ZoneToken)] = &[
    ("gmt", fixed(0)),
    ("ut", fixed(0)),
    ("utc", fixed(0)),
    ("z", fixed(0)),
    ("est", fixed(-5 * 60)),
    ("edt", fixed(-4 * 60)),
    ("cst", fixed(-6 * 60)),
    ("cdt", fixed(-5 * 60)),
    ("mst", fixed(-7 * 60)),
    ("mdt", fixed(-6 * 60)),
    ("pst", fixed(-8 * 60)),
    ("pdt", fixed(-7 * 60)),
    ("wet", ZoneToken::Named(Tz::WET)),
    ("cet", ZoneToken::Named(Tz::CET)),
    ("eet", ZoneToken::Named(Tz::EET)),
    ("west", fixed(60)),
    ("cest", fixed(2 * 60)),
    ("eest", fixed(3 * 60)),
];

/// Full spellings accepted inside parenthesized annotations like
/// `(Pacific Daylight Time)`.
const ZONE_FULL_NAMES: &[(&str, ZoneToken)] = &[
    ("greenwich mean time", fixed(0)),
    ("coordinated universal time", fixed(0)),
    ("eastern standard time", fixed(-5 * 60)),
    ("eastern daylight time", fixed(-4 * 60)),
    ("central standard time", fixed(-6 * 60)),
    ("central daylight time", fixed(-5 * 60)),
    ("mountain standard time", fixed(-7 * 60)),
    ("mountain daylight time", fixed(-6 * 60)),
    ("pacific standard time", fixed(-8 * 60)),
    ("pacific daylight time", fixed(-7 * 60)),
    ("western european time", ZoneToken::Named(Tz::WET)),
    ("central european time", ZoneToken::Named(Tz::CET)),
    ("eastern european time", ZoneToken::Named(Tz::EET)),
    ("western european summer time", fixed(60)),
    ("central european summer time", fixed(2 * 60)),
    ("eastern european summer time", fixed(3 * 60)),
];

/// Resolve free text (from a parenthesized annotation) to a zone.
///
/// Tries the abbreviation table, then full names, then an IANA identifier
/// lookup through the tz database.
pub(crate) fn resolve_zone_text(text: &str) -> Option<ZoneToken> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    for (name, token) in ZONE_ABBREVIATIONS {
        if *name == lower {
            return Some(*token);
        }
    }
    for (name, token) in ZONE_FULL_NAMES {
        if *name == lower {
            return Some(*token);
        }
    }
    trimmed.parse::<Tz>().ok().map(ZoneToken::Named)
}

/// Anchor a wall-clock time in a zone. Fold (fall-back) times take the
/// earliest instant; gap (spring-forward) times shift one hour later, the
/// lenient calendar convention.
pub(crate) fn anchor_wall_clock<Z: TimeZone>(
    tz: &Z,
    naive: NaiveDateTime,
) -> Option<DateTime<Z>> {
    tz.from_local_datetime(&naive).earliest().or_else(|| {
        let shifted = naive.checked_add_signed(Duration::hours(1))?;
        tz.from_local_datetime(&shifted).earliest()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Offset, TimeZone};

    #[test]
    fn test_cet_follows_dst() {
        let jan = Tz::CET.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let jun = Tz::CET.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(jan.offset().fix().local_minus_utc(), 3600);
        assert_eq!(jun.offset().fix().local_minus_utc(), 7200);
    }

    #[test]
    fn test_cest_is_pinned_to_summer_offset() {
        let token = resolve_zone_text("CEST").unwrap();
        assert_eq!(token, ZoneToken::Fixed { minutes: 120 });
    }

    #[test]
    fn test_full_name_lookup() {
        assert_eq!(
            resolve_zone_text("Pacific Daylight Time"),
            Some(ZoneToken::Fixed { minutes: -7 * 60 })
        );
    }

    #[test]
    fn test_iana_lookup() {
        match resolve_zone_text("America/New_York") {
            Some(ZoneToken::Named(tz)) => assert_eq!(tz, Tz::America__New_York),
            other => panic!("expected named zone, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_text_is_none() {
        assert_eq!(resolve_zone_text("Middle Earth Time"), None);
        assert_eq!(resolve_zone_text(""), None);
    }

    #[test]
    fn test_anchor_shifts_through_spring_forward_gap() {
        // 2:30 on 2024-03-31 does not exist in CET; the anchor lands an
        // hour later instead of failing
        let gap = NaiveDate::from_ymd_opt(2024, 3, 31)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let anchored = anchor_wall_clock(&Tz::CET, gap).unwrap();
        assert_eq!(
            anchored.naive_local(),
            gap + Duration::hours(1),
        );
    }
}
