use chrono::{Datelike, NaiveDate, Weekday};

use crate::intent::RangeCandidate;
use crate::limits::{SUPPORTED_YEAR, YEAR_END, YEAR_START};
use crate::model::{HolidayLedger, LeaveDay};

// ── Range disambiguation ─────────────────────────────────────────

/// Inclusive supported-year window. Call sites that received no explicit
/// range resolve their defaults here, by name.
pub fn year_window() -> (NaiveDate, NaiveDate) {
    let start = parse_iso_day(YEAR_START).expect("year window start constant parses");
    let end = parse_iso_day(YEAR_END).expect("year window end constant parses");
    (start, end)
}

/// Pick one reading of an ambiguous date phrase: the first candidate whose
/// start or end string contains the supported year wins, else index 0.
///
/// Compatibility heuristic, year-hardcoded and lexical: a range that
/// merely mentions "2019" anywhere in a bound matches. Not calendar-correct
/// resolution; known correctness risk, kept for behavioral compatibility.
pub fn disambiguate(candidates: &[RangeCandidate]) -> usize {
    let in_year = |bound: &Option<String>| {
        bound
            .as_deref()
            .is_some_and(|v| v.contains(SUPPORTED_YEAR))
    };
    candidates
        .iter()
        .position(|c| in_year(&c.start) || in_year(&c.end))
        .unwrap_or(0)
}

/// Resolve the turn's date candidates to one concrete window. No
/// candidates, or missing/unparseable bounds, default to the year window.
pub fn resolve_window(candidates: &[RangeCandidate]) -> (NaiveDate, NaiveDate) {
    let (year_start, year_end) = year_window();
    let Some(chosen) = candidates.get(disambiguate(candidates)) else {
        return (year_start, year_end);
    };
    let start = chosen
        .start
        .as_deref()
        .and_then(parse_iso_day)
        .unwrap_or(year_start);
    let end = chosen
        .end
        .as_deref()
        .and_then(parse_iso_day)
        .unwrap_or(year_end);
    (start, end)
}

/// Parse the date portion of an ISO date or datetime string.
pub fn parse_iso_day(s: &str) -> Option<NaiveDate> {
    let day = s.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

// ── Business-day enumeration ─────────────────────────────────────

/// Walk [start, end] inclusive and keep eligible business days: weekends
/// are skipped, as is any date already present in the ledger (date-only
/// equality). Recomputed every turn, since the ledger may have changed after
/// the candidates were last shown.
pub fn business_days(start: NaiveDate, end: NaiveDate, ledger: &HolidayLedger) -> Vec<LeaveDay> {
    let mut days = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        let weekend = matches!(cursor.weekday(), Weekday::Sat | Weekday::Sun);
        if !weekend && !ledger.contains_date(cursor) {
            days.push(LeaveDay::on(cursor, ""));
        }
        cursor = match cursor.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    days
}

/// Ledger entries whose date falls in the inclusive window.
pub fn within_window(days: &[LeaveDay], start: NaiveDate, end: NaiveDate) -> Vec<LeaveDay> {
    days.iter()
        .filter(|d| d.date >= start && d.date <= end)
        .cloned()
        .collect()
}
