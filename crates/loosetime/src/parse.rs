//! Lenient date/time parsing.
//!
//! The heart of the crate is a single left-to-right scan that classifies
//! numeric and alphabetic runs against a partially-filled set of calendar
//! fields, the way the old JavaScript-style date scanners did. Around that
//! engine, each entry point layers an ordered cascade of narrower fallback
//! strategies; a strategy's failure is silently discarded in favor of the
//! next, and only the final strategy's error reaches the caller.
//!
//! # Entry points
//!
//! - [`parse_date_time`] — free-form string → epoch milliseconds
//! - [`parse_date`] — date-only string → epoch milliseconds at local midnight
//! - [`parse_time`] — time-only string → milliseconds since midnight
//! - [`parse_date_in_scope`] / [`parse_date_time_in_scope`] — the same, with
//!   policy and extra patterns supplied by a [`ParseContext`]
//!
//! All functions are pure: no state survives a call, and the only ambient
//! input is the process-local timezone used when the input names none.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Timelike,
};

use crate::error::{ConvertError, Result};
use crate::options::{MonthDayOrder, ParseContext};
use crate::zones::{anchor_wall_clock, resolve_zone_text, ZoneToken, ZONE_ABBREVIATIONS};

// ── Public entry points ─────────────────────────────────────────────────────

/// Parse a free-form date-time string into epoch milliseconds.
///
/// Tries the lenient scanner first, then a chain of fixed-shape fallbacks:
/// strict ISO (`yyyy-MM-dd[ T]HH:mm[:ss]`), the `EEE MMM dd HH:mm:ss zzz
/// yyyy` shape emitted by older platform clock types, XML Schema dateTime,
/// and finally a bare 8-digit `yyyyMMdd`.
///
/// # Arguments
///
/// * `input` — the raw string
/// * `order` — how an ambiguous `3/2/01` resolves; see [`MonthDayOrder`]
/// * `strict` — reject inputs whose calendar arithmetic silently overflows
///   (e.g. day 32 wrapping into the next month)
///
/// # Errors
///
/// [`ConvertError::InvalidDateFormat`] when no strategy recognizes the input,
/// [`ConvertError::OutOfRange`] for strict-mode overflow.
pub fn parse_date_time(input: &str, order: MonthDayOrder, strict: bool) -> Result<i64> {
    parse_date_time_with_base(input, order, strict, Local::now().year())
}

/// Parse a date-only string into epoch milliseconds at local midnight.
///
/// Strategy order: exact `yyyy-MM-dd` fast path, the lenient scanner in
/// date-only mode, 8-digit `yyyyMMdd` (years 1800–2200 only), a lenient
/// month-first `M-d-yy`, and XML Schema date.
///
/// # Errors
///
/// [`ConvertError::InvalidDateFormat`] when no strategy recognizes the input,
/// [`ConvertError::OutOfRange`] for strict-mode overflow.
pub fn parse_date(input: &str, order: MonthDayOrder, strict: bool) -> Result<i64> {
    parse_date_with_base(input, order, strict, Local::now().year())
}

/// Parse a time-only string into milliseconds since midnight.
///
/// In strict mode, date components and any field overflow (hour ≥ 24,
/// minute/second ≥ 60, fraction ≥ 1s) are rejected. Non-strict parsing lets
/// overflow accumulate into the returned count without normalizing, which is
/// what elapsed-time callers want: `parse_time("70:30", false)` is 70.5
/// hours.
///
/// # Errors
///
/// [`ConvertError::InvalidDateFormat`] for unrecognized input,
/// [`ConvertError::OutOfRange`] for strict-mode overflow.
pub fn parse_time(input: &str, strict: bool) -> Result<i64> {
    parse_parts(
        input,
        ParseMode::TimeOnly,
        MonthDayOrder::MonthDay,
        strict,
        Local::now().year(),
    )
}

/// [`parse_date_time`] with policy drawn from a configuration scope.
///
/// The scope's extra date-time pattern, when configured, is tried before the
/// standard cascade.
pub fn parse_date_time_in_scope<C: ParseContext + ?Sized>(
    ctx: &C,
    input: &str,
    strict: bool,
) -> Result<i64> {
    if let Some(pattern) = ctx.extra_date_time_pattern() {
        if let Ok(millis) = parse_with_pattern(input, pattern) {
            return Ok(millis);
        }
    }
    parse_date_time_with_base(input, ctx.month_day_order(), strict, Local::now().year())
}

/// [`parse_date`] with policy drawn from a configuration scope.
pub fn parse_date_in_scope<C: ParseContext + ?Sized>(
    ctx: &C,
    input: &str,
    strict: bool,
) -> Result<i64> {
    if let Some(pattern) = ctx.extra_date_pattern() {
        if let Ok(millis) = parse_with_pattern(input, pattern) {
            return Ok(millis);
        }
    }
    parse_date_with_base(input, ctx.month_day_order(), strict, Local::now().year())
}

// ── Strategy cascades ───────────────────────────────────────────────────────

fn parse_date_time_with_base(
    input: &str,
    order: MonthDayOrder,
    strict: bool,
    base_year: i32,
) -> Result<i64> {
    parse_parts(input, ParseMode::DateTime, order, strict, base_year)
        .or_else(|_| parse_iso_literal(input))
        .or_else(|_| parse_platform_clock(input))
        .or_else(|_| parse_xml_date_time(input))
        .or_else(|_| parse_eight_digit(input))
}

fn parse_date_with_base(
    input: &str,
    order: MonthDayOrder,
    strict: bool,
    base_year: i32,
) -> Result<i64> {
    parse_ymd_literal(input)
        .or_else(|_| parse_parts(input, ParseMode::DateOnly, order, strict, base_year))
        .or_else(|_| parse_eight_digit(input))
        .or_else(|_| parse_month_first_dashed(input, strict, base_year))
        .or_else(|_| parse_xml_date(input))
}

// ── Scanner state ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseMode {
    DateTime,
    DateOnly,
    TimeOnly,
}

/// Calendar fields accumulated during one scan. Call-local; each field may be
/// set exactly once, and a second assignment of the same kind means the input
/// was ambiguous.
#[derive(Debug)]
struct FieldAcc {
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    min: i32,
    sec: i32,
    /// Sixtieths of a second, the trailing field of FCS-style `HH:MM:SS:JJ`.
    jiffies: i32,
    frac_millis: i32,
    month_named: bool,
    zone: Option<ZoneToken>,
}

impl FieldAcc {
    fn new() -> Self {
        FieldAcc {
            year: -1,
            month: -1,
            day: -1,
            hour: -1,
            min: -1,
            sec: -1,
            jiffies: -1,
            frac_millis: -1,
            month_named: false,
            zone: None,
        }
    }

    fn any_time_set(&self) -> bool {
        self.hour >= 0 || self.min >= 0 || self.sec >= 0 || self.jiffies >= 0
            || self.frac_millis >= 0
    }

    fn any_date_set(&self) -> bool {
        self.year >= 0 || self.month >= 0 || self.day >= 0
    }

    /// Sub-second milliseconds from the jiffy and fraction fields.
    fn subsec_millis(&self) -> i64 {
        let jiffy = if self.jiffies >= 0 {
            self.jiffies as i64 * 1000 / 60
        } else {
            0
        };
        jiffy + self.frac_millis.max(0) as i64
    }
}

// ── The scan ────────────────────────────────────────────────────────────────

/// Single left-to-right scan over the input, one token of context.
///
/// Whitespace and commas separate tokens; `(...)` is consumed as a zone
/// annotation; every other punctuation mark is remembered as the separator
/// preceding the next run. Returns epoch milliseconds, or milliseconds since
/// midnight in time-only mode.
fn parse_parts(
    input: &str,
    mode: ParseMode,
    order: MonthDayOrder,
    strict: bool,
    base_year: i32,
) -> Result<i64> {
    let bytes = input.as_bytes();
    let mut acc = FieldAcc::new();
    let mut prev: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\r' | b'\n' | b',' => i += 1,
            b'0'..=b'9' => {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                let next = bytes.get(i).copied();
                apply_number(&mut acc, &input[start..i], prev, next, mode, order, base_year)
                    .map_err(|_| invalid(input))?;
                prev = None;
            }
            b'a'..=b'z' | b'A'..=b'Z' => {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                    i += 1;
                }
                apply_word(&mut acc, &input[start..i]).map_err(|_| invalid(input))?;
                prev = None;
            }
            b'(' => {
                let close = input[i..]
                    .find(')')
                    .map(|j| i + j)
                    .ok_or_else(|| invalid(input))?;
                if acc.zone.is_none() {
                    let token =
                        resolve_zone_text(&input[i + 1..close]).ok_or_else(|| invalid(input))?;
                    acc.zone = Some(token);
                }
                // annotations after a real zone are ignored; first zone wins
                i = close + 1;
                prev = None;
            }
            c @ (b'+' | b'-' | b':' | b'/' | b'.') => {
                prev = Some(c);
                i += 1;
            }
            _ => return Err(invalid(input)),
        }
    }

    finish(&acc, mode, strict, input)
}

/// Scan-internal unit error; mapped to a typed error carrying the full input
/// at the scan loop.
struct Reject;

type Applied = std::result::Result<(), Reject>;

fn is_date_sep(c: Option<u8>) -> bool {
    matches!(c, Some(b'/') | Some(b'-') | Some(b'.'))
}

/// Classify one maximal digit run against the accumulator.
///
/// Priority: signed timezone offset, fractional seconds, year, colon-driven
/// time sequence, slash/dash/dot date fields, then the bare-number
/// fallthrough chain (minute after an hour, second after a minute, jiffies
/// after a second, day of month, trailing year).
fn apply_number(
    acc: &mut FieldAcc,
    run: &str,
    prev: Option<u8>,
    next: Option<u8>,
    mode: ParseMode,
    order: MonthDayOrder,
    base_year: i32,
) -> Applied {
    let ndigits = run.len();
    if ndigits > 9 {
        return Err(Reject);
    }
    let value: i64 = run.parse().map_err(|_| Reject)?;

    let frac_context =
        prev == Some(b'.') && (acc.min >= 0 || acc.sec >= 0) && acc.frac_millis < 0;

    // signed offset, only meaningful once a time has started
    if matches!(prev, Some(b'+') | Some(b'-')) && acc.hour >= 0 && !frac_context {
        if acc.zone.is_some() {
            return Err(Reject); // ambiguous timezone
        }
        let magnitude = if value >= 24 {
            (value / 100) * 60 + value % 100
        } else {
            value * 60
        };
        if magnitude >= 24 * 60 {
            return Err(Reject);
        }
        let minutes = if prev == Some(b'-') {
            -magnitude
        } else {
            magnitude
        };
        acc.zone = Some(ZoneToken::Fixed {
            minutes: minutes as i32,
        });
        return Ok(());
    }

    if frac_context {
        // left-aligned decimal: ".1" is 100ms, ".012" is 12ms
        let nanos = value * 10_i64.pow(9 - ndigits as u32);
        acc.frac_millis = (nanos / 1_000_000) as i32;
        return Ok(());
    }

    // year, never inside a colon sequence and never in time-only mode
    if mode != ParseMode::TimeOnly && prev != Some(b':') && next != Some(b':') {
        let trailing_year = is_date_sep(prev) && acc.month >= 0 && acc.day >= 0;
        if ndigits > 3 || value >= 70 || trailing_year {
            if acc.year >= 0 {
                return Err(Reject);
            }
            acc.year = resolve_year(value, base_year);
            return Ok(());
        }
    }

    // colon-driven time sequence; a bare number opens it in time-only mode
    if prev == Some(b':') || next == Some(b':') || (mode == ParseMode::TimeOnly && acc.hour < 0)
    {
        let v = value as i32;
        if acc.hour < 0 {
            acc.hour = v;
        } else if acc.min < 0 {
            acc.min = v;
        } else if acc.sec < 0 {
            acc.sec = v;
        } else if acc.jiffies < 0 {
            acc.jiffies = v;
        } else {
            return Err(Reject);
        }
        return Ok(());
    }

    // slash/dash/dot date fields
    if is_date_sep(prev) || matches!(next, Some(b'/') | Some(b'-') | Some(b'.')) {
        if mode == ParseMode::TimeOnly {
            return Err(Reject);
        }
        let v = value as i32;
        if acc.year >= 0 {
            // with the year known, the remaining two always read month, day
            if acc.month < 0 {
                acc.month = v - 1;
            } else if acc.day < 0 {
                acc.day = v;
            } else {
                return Err(Reject);
            }
        } else {
            let (first, second) = match order {
                MonthDayOrder::MonthDay => (&mut acc.month, &mut acc.day),
                MonthDayOrder::DayMonth => (&mut acc.day, &mut acc.month),
            };
            let month_first = matches!(order, MonthDayOrder::MonthDay);
            if *first < 0 {
                *first = if month_first { v - 1 } else { v };
            } else if *second < 0 {
                *second = if month_first { v } else { v - 1 };
            } else {
                return Err(Reject);
            }
        }
        return Ok(());
    }

    // bare number: continue an open time sequence, else date slots
    let v = value as i32;
    if acc.hour >= 0 && acc.min < 0 {
        acc.min = v;
    } else if acc.min >= 0 && acc.sec < 0 {
        acc.sec = v;
    } else if acc.sec >= 0 && acc.jiffies < 0 {
        acc.jiffies = v;
    } else if acc.day < 0 {
        if mode == ParseMode::TimeOnly {
            return Err(Reject);
        }
        acc.day = v;
    } else if acc.year < 0 && acc.month >= 0 && acc.day >= 0 {
        acc.year = resolve_year(value, base_year);
    } else {
        return Err(Reject);
    }
    Ok(())
}

/// Two-digit years slide on a 100-year window centered 80 years back from
/// `base_year`; larger values are literal.
fn resolve_year(value: i64, base_year: i32) -> i32 {
    if value >= 100 {
        return value as i32;
    }
    let pivot = base_year - 80;
    let cutoff = pivot % 100;
    let century = pivot - cutoff;
    if value as i32 > cutoff {
        century + value as i32
    } else {
        century + 100 + value as i32
    }
}

// ── Word vocabulary ─────────────────────────────────────────────────────────

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const WEEKDAYS: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

#[derive(Debug, Clone, Copy, PartialEq)]
enum WordToken {
    Am,
    Pm,
    Weekday,
    Month(i32),
    Zone(ZoneToken),
    /// The literal ISO date/time separator `T`.
    IsoT,
}

/// Case-insensitive prefix lookup, first match wins. A word of length one
/// matches only the single-letter entries (`t`, `z`); anything longer needs
/// at least two characters of prefix.
fn classify_word(word: &str) -> Option<WordToken> {
    let w = word.to_ascii_lowercase();
    if w.len() == 1 {
        return match w.as_str() {
            "t" => Some(WordToken::IsoT),
            "z" => Some(WordToken::Zone(ZoneToken::Fixed { minutes: 0 })),
            _ => None,
        };
    }
    if "am".starts_with(&w) {
        return Some(WordToken::Am);
    }
    if "pm".starts_with(&w) {
        return Some(WordToken::Pm);
    }
    if WEEKDAYS.iter().any(|d| d.starts_with(&w)) {
        return Some(WordToken::Weekday);
    }
    if let Some(idx) = MONTHS.iter().position(|m| m.starts_with(&w)) {
        return Some(WordToken::Month(idx as i32));
    }
    for (name, token) in ZONE_ABBREVIATIONS {
        if name.starts_with(&w) {
            return Some(WordToken::Zone(*token));
        }
    }
    None
}

fn apply_word(acc: &mut FieldAcc, word: &str) -> Applied {
    match classify_word(word).ok_or(Reject)? {
        // weekday names are consumed but never validated against the date
        WordToken::Weekday => Ok(()),
        WordToken::Am => {
            if acc.hour < 0 || acc.hour > 12 {
                return Err(Reject);
            }
            if acc.hour == 12 {
                acc.hour = 0;
            }
            Ok(())
        }
        WordToken::Pm => {
            if acc.hour < 0 || acc.hour > 12 {
                return Err(Reject);
            }
            if acc.hour != 12 {
                acc.hour += 12;
            }
            Ok(())
        }
        WordToken::Month(m) => {
            if acc.month < 0 {
                acc.month = m;
                acc.month_named = true;
                Ok(())
            } else if !acc.month_named && acc.day < 0 {
                // the earlier number was really the day, as in `01/Jan/2001`
                acc.day = acc.month + 1;
                acc.month = m;
                acc.month_named = true;
                Ok(())
            } else {
                Err(Reject)
            }
        }
        WordToken::Zone(token) => {
            if acc.zone.is_some() {
                return Err(Reject);
            }
            acc.zone = Some(token);
            Ok(())
        }
        WordToken::IsoT => {
            if acc.any_time_set() {
                return Err(Reject);
            }
            Ok(())
        }
    }
}

// ── Validation and composition ──────────────────────────────────────────────

fn finish(acc: &FieldAcc, mode: ParseMode, strict: bool, input: &str) -> Result<i64> {
    match mode {
        ParseMode::TimeOnly => {
            if acc.hour < 0 {
                return Err(invalid(input));
            }
            if strict {
                if acc.any_date_set() {
                    return Err(invalid(input));
                }
                if acc.hour >= 24
                    || acc.min >= 60
                    || acc.sec >= 60
                    || acc.subsec_millis() >= 1000
                {
                    return Err(out_of_range(input));
                }
            }
            Ok(acc.hour as i64 * 3_600_000
                + acc.min.max(0) as i64 * 60_000
                + acc.sec.max(0) as i64 * 1000
                + acc.subsec_millis())
        }
        ParseMode::DateOnly => {
            if acc.any_time_set() {
                return Err(invalid(input));
            }
            compose(acc, strict, input)
        }
        ParseMode::DateTime => compose(acc, strict, input),
    }
}

/// Lenient calendar composition: month overflow folds into the
/// year, day and time overflow roll forward through plain arithmetic, and the
/// result is anchored in the resolved zone. Strict mode then re-reads the
/// wall-clock fields of the composed instant and requires them to match the
/// inputs exactly.
fn compose(acc: &FieldAcc, strict: bool, input: &str) -> Result<i64> {
    if acc.year < 0 || acc.month < 0 || acc.day < 0 {
        return Err(invalid(input));
    }
    let year = acc.year as i64 + (acc.month as i64).div_euclid(12);
    let month0 = (acc.month as i64).rem_euclid(12);
    let first = NaiveDate::from_ymd_opt(year as i32, month0 as u32 + 1, 1)
        .ok_or_else(|| out_of_range(input))?;
    let date = first
        .checked_add_signed(Duration::days(acc.day as i64 - 1))
        .ok_or_else(|| out_of_range(input))?;
    let time_millis = acc.hour.max(0) as i64 * 3_600_000
        + acc.min.max(0) as i64 * 60_000
        + acc.sec.max(0) as i64 * 1000
        + acc.subsec_millis();
    let naive = date
        .and_time(NaiveTime::MIN)
        .checked_add_signed(Duration::milliseconds(time_millis))
        .ok_or_else(|| out_of_range(input))?;

    let (instant, wall) = resolve_instant(naive, acc.zone, input)?;

    if strict {
        let matches = wall.year() as i64 == acc.year as i64
            && wall.month0() as i32 == acc.month
            && wall.day() as i32 == acc.day
            && wall.hour() as i32 == acc.hour.max(0)
            && wall.minute() as i32 == acc.min.max(0)
            && wall.second() as i32 == acc.sec.max(0)
            && (wall.nanosecond() / 1_000_000) as i64 == acc.subsec_millis();
        if !matches {
            return Err(out_of_range(input));
        }
    }
    Ok(instant)
}

fn map_zone<Z: TimeZone>(tz: &Z, naive: NaiveDateTime) -> Option<(i64, NaiveDateTime)> {
    let resolved = anchor_wall_clock(tz, naive)?;
    Some((resolved.timestamp_millis(), resolved.naive_local()))
}

fn resolve_instant(
    naive: NaiveDateTime,
    zone: Option<ZoneToken>,
    input: &str,
) -> Result<(i64, NaiveDateTime)> {
    let resolved = match zone {
        None => map_zone(&Local, naive),
        Some(ZoneToken::Fixed { minutes }) => {
            let offset = FixedOffset::east_opt(minutes * 60).ok_or_else(|| invalid(input))?;
            map_zone(&offset, naive)
        }
        Some(ZoneToken::Named(tz)) => map_zone(&tz, naive),
    };
    resolved.ok_or_else(|| out_of_range(input))
}

fn invalid(input: &str) -> ConvertError {
    ConvertError::InvalidDateFormat(input.trim().to_string())
}

fn out_of_range(input: &str) -> ConvertError {
    ConvertError::OutOfRange(input.trim().to_string())
}

// ── Fallback strategies ─────────────────────────────────────────────────────

/// Exact `yyyy-MM-dd`, the overwhelmingly common case for program-generated
/// dates, checked before the general scanner ever runs.
fn parse_ymd_literal(input: &str) -> Result<i64> {
    let s = input.trim();
    let b = s.as_bytes();
    let shaped = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !shaped {
        return Err(invalid(input));
    }
    let date =
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid(input))?;
    local_midnight(date, input)
}

/// Strict ISO date-times: `yyyy-MM-dd[ T]HH:mm[:ss]`.
fn parse_iso_literal(input: &str) -> Result<i64> {
    let s = input.trim();
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| invalid(input))?;
    local_instant(naive, input)
}

/// `EEE MMM dd HH:mm:ss zzz yyyy`, the shape of legacy platform clock
/// stringifications like `Sat Feb 03 04:05:06 PST 2001`.
fn parse_platform_clock(input: &str) -> Result<i64> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 6 {
        return Err(invalid(input));
    }
    if !matches!(classify_word(parts[0]), Some(WordToken::Weekday)) {
        return Err(invalid(input));
    }
    let month = match classify_word(parts[1]) {
        Some(WordToken::Month(m)) => m as u32,
        _ => return Err(invalid(input)),
    };
    let day: u32 = parts[2].parse().map_err(|_| invalid(input))?;
    let hms: Vec<&str> = parts[3].split(':').collect();
    if hms.len() != 3 {
        return Err(invalid(input));
    }
    let hour: u32 = hms[0].parse().map_err(|_| invalid(input))?;
    let min: u32 = hms[1].parse().map_err(|_| invalid(input))?;
    let sec: u32 = hms[2].parse().map_err(|_| invalid(input))?;
    let zone = resolve_zone_text(parts[4]).ok_or_else(|| invalid(input))?;
    let year: i32 = parts[5].parse().map_err(|_| invalid(input))?;

    let naive = NaiveDate::from_ymd_opt(year, month + 1, day)
        .and_then(|d| d.and_hms_opt(hour, min, sec))
        .ok_or_else(|| out_of_range(input))?;
    resolve_instant(naive, Some(zone), input).map(|(ms, _)| ms)
}

/// XML Schema dateTime: RFC 3339 when an offset is present, otherwise local.
fn parse_xml_date_time(input: &str) -> Result<i64> {
    let s = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp_millis());
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|_| invalid(input))?;
    local_instant(naive, input)
}

/// XML Schema date: `yyyy-MM-dd` with an optional `Z` or `±HH:MM` suffix.
fn parse_xml_date(input: &str) -> Result<i64> {
    let s = input.trim();
    if !s.is_ascii() {
        return Err(invalid(input));
    }
    let (date_part, zone) = if let Some(stripped) = s.strip_suffix('Z') {
        (stripped, Some(ZoneToken::Fixed { minutes: 0 }))
    } else if s.len() > 10 {
        let (head, tail) = s.split_at(s.len() - 6);
        let b = tail.as_bytes();
        let offset_shaped = (b[0] == b'+' || b[0] == b'-') && b[3] == b':';
        if !offset_shaped {
            return Err(invalid(input));
        }
        let hours: i32 = tail[1..3].parse().map_err(|_| invalid(input))?;
        let mins: i32 = tail[4..6].parse().map_err(|_| invalid(input))?;
        let magnitude = hours * 60 + mins;
        let minutes = if b[0] == b'-' { -magnitude } else { magnitude };
        (head, Some(ZoneToken::Fixed { minutes }))
    } else {
        (s, None)
    };
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| invalid(input))?;
    resolve_instant(date.and_time(NaiveTime::MIN), zone, input).map(|(ms, _)| ms)
}

/// Bare `yyyyMMdd`, accepted only for years 1800–2200 so that stray numeric
/// identifiers do not masquerade as dates.
fn parse_eight_digit(input: &str) -> Result<i64> {
    let s = input.trim();
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(input));
    }
    let year: i32 = s[0..4].parse().map_err(|_| invalid(input))?;
    if !(1800..=2200).contains(&year) {
        return Err(out_of_range(input));
    }
    let month: u32 = s[4..6].parse().map_err(|_| invalid(input))?;
    let day: u32 = s[6..8].parse().map_err(|_| invalid(input))?;
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| out_of_range(input))?;
    local_midnight(date, input)
}

/// Lenient dashed `M-d-yy`, always month-first regardless of locale policy.
fn parse_month_first_dashed(input: &str, strict: bool, base_year: i32) -> Result<i64> {
    let parts: Vec<&str> = input.trim().split('-').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty() || p.len() > 4) {
        return Err(invalid(input));
    }
    let month: i32 = parts[0].parse().map_err(|_| invalid(input))?;
    let day: i32 = parts[1].parse().map_err(|_| invalid(input))?;
    let year: i64 = parts[2].parse().map_err(|_| invalid(input))?;
    let mut acc = FieldAcc::new();
    acc.year = resolve_year(year, base_year);
    acc.month = month - 1;
    acc.day = day;
    compose(&acc, strict, input)
}

/// A caller-configured chrono pattern, tried as a date-time first and as a
/// bare date second.
fn parse_with_pattern(input: &str, pattern: &str) -> Result<i64> {
    let s = input.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
        return local_instant(naive, input);
    }
    let date = NaiveDate::parse_from_str(s, pattern).map_err(|_| invalid(input))?;
    local_midnight(date, input)
}

fn local_instant(naive: NaiveDateTime, input: &str) -> Result<i64> {
    map_zone(&Local, naive)
        .map(|(ms, _)| ms)
        .ok_or_else(|| out_of_range(input))
}

fn local_midnight(date: NaiveDate, input: &str) -> Result<i64> {
    local_instant(date.and_time(NaiveTime::MIN), input)
}

// ── Tests ───────────────────────────────────────────────────────────────────
