//! # loosetime
//!
//! Lenient parsing of human and machine date, time, and duration strings
//! into epoch milliseconds, plus the matching formatters for round-tripping
//! program-generated values.
//!
//! The parser accepts the dozens of ambiguous shapes people and legacy
//! systems actually write (`3/2/01`, `3-FEB-2001 04:05:06.12`,
//! `Sat Feb 03 04:05:06 PST 2001`, `20010203`, ISO and XML Schema variants),
//! resolving month/day ambiguity per caller policy and refusing, in strict
//! mode, anything whose calendar arithmetic would silently overflow.
//!
//! ## Modules
//!
//! - [`parse`] — the lenient scanner and the `parse_date` / `parse_date_time`
//!   / `parse_time` entry points with their fallback cascades
//! - [`duration`] — `1h2m3s` / `P1DT2H3M4S` durations: parse, format, and
//!   calendar-aware add/subtract
//! - [`iso`] — truncated ISO-8601 instant formatting
//! - [`options`] — month/day order policy and the scope-configuration seam
//! - [`error`] — error types
//!
//! Every public function is pure and safe to call from any thread; the only
//! ambient input is the process-local timezone, used when an input string
//! names no zone of its own.

pub mod duration;
pub mod error;
pub mod iso;
pub mod options;
pub mod parse;
mod zones;

pub use duration::{add_duration, format_duration, parse_duration, subtract_duration};
pub use error::{ConvertError, Result};
pub use iso::format_iso;
pub use options::{MonthDayOrder, ParseContext};
pub use parse::{
    parse_date, parse_date_in_scope, parse_date_time, parse_date_time_in_scope, parse_time,
};
