//! Caller-supplied parsing policy.
//!
//! The parser itself is pure; everything deployment-specific arrives through
//! the values in this module. [`MonthDayOrder`] settles what `3/2/01` means,
//! and [`ParseContext`] is the seam through which a multi-tenant
//! configuration store hands the parser its per-scope settings without the
//! parser knowing where they came from.

use serde::{Deserialize, Serialize};

/// Which calendar field the first number of an ambiguous numeric date fills.
///
/// `3/2/01` is March 2 under [`MonthDayOrder::MonthDay`] (US convention) and
/// February 3 under [`MonthDayOrder::DayMonth`] (GB/EU convention). Once a
/// year has already been parsed, the remaining two numbers always resolve
/// month-before-day regardless of this policy, so `2001-03-02` is March 2
/// everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MonthDayOrder {
    /// Month before day (US style).
    #[default]
    MonthDay,
    /// Day before month (GB/EU style).
    DayMonth,
}

/// Per-scope parsing configuration supplied by the caller.
///
/// Implementors are opaque scope handles (a tenant, a project, a server):
/// the parser only ever asks for these three values. Extra patterns are
/// chrono `strftime`-style format strings tried before the built-in
/// strategies.
pub trait ParseContext {
    /// The scope's month/day disambiguation policy.
    fn month_day_order(&self) -> MonthDayOrder;

    /// An additional date format to try before the standard cascade.
    fn extra_date_pattern(&self) -> Option<&str> {
        None
    }

    /// An additional date-time format to try before the standard cascade.
    fn extra_date_time_pattern(&self) -> Option<&str> {
        None
    }
}

impl ParseContext for MonthDayOrder {
    fn month_day_order(&self) -> MonthDayOrder {
        *self
    }
}
