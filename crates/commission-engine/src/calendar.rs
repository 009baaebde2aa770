//! Temporal resolution: which year and month an operation belongs to.
//!
//! Key design decisions:
//! - "Now" comes in through the [`Clock`] trait so report code stays
//!   deterministic under test and when replaying a past year.
//! - In-progress operations have no settled date; they resolve to the
//!   current (or pinned) year but always to the real current month.
//! - Dated operations use the first recorded date field that is present.
//!   If that field holds unparseable text the operation has no period at
//!   all; later fields are not consulted.

use chrono::{Datelike, NaiveDate, Utc};

use crate::operation::{Operation, OperationStatus};

/// Source of "today" for temporal resolution.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall-clock UTC date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// A pinned date, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Parse a stored "YYYY-MM-DD" date, `None` for anything malformed.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// The date an operation is recorded under: operation date if present,
/// otherwise reservation date. Present-but-garbage text yields `None`
/// without falling through to the next field.
pub fn recorded_date(op: &Operation) -> Option<NaiveDate> {
    let raw = [op.operation_date.as_deref(), op.reservation_date.as_deref()]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())?;
    parse_date(raw)
}

/// Year an operation counts toward. `effective_year` pins in-progress
/// operations to a chosen year instead of the clock's.
pub fn operation_year(
    op: &Operation,
    clock: &impl Clock,
    effective_year: Option<i32>,
) -> Option<i32> {
    if op.status == OperationStatus::InProgress {
        return Some(effective_year.unwrap_or_else(|| clock.today().year()));
    }
    recorded_date(op).map(|d| d.year())
}

/// Year and month an operation counts toward.
///
/// In-progress operations take the current month even when their year is
/// pinned, so a replayed year still shows open deals in "this" month.
pub fn operation_year_month(
    op: &Operation,
    clock: &impl Clock,
    effective_year: Option<i32>,
) -> Option<(i32, u32)> {
    if op.status == OperationStatus::InProgress {
        let today = clock.today();
        return Some((effective_year.unwrap_or_else(|| today.year()), today.month()));
    }
    recorded_date(op).map(|d| (d.year(), d.month()))
}
