use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{AppError, AppResult};

/// Storage format for ledger timestamps. Text in this shape compares
/// lexically in the same order as chronologically, which is what the
/// range queries rely on.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar range for a report, normalized to start-of-day /
/// end-of-day bounds when querying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse the `{startDate, endDate}` pair of a report request. Both
    /// fields are required; absence is a validation failure before any
    /// query runs.
    pub fn parse(start_date: Option<&str>, end_date: Option<&str>) -> AppResult<Self> {
        let (start, end) = match (start_date, end_date) {
            (Some(s), Some(e)) if !s.is_empty() && !e.is_empty() => (s, e),
            _ => {
                return Err(AppError::Validation(
                    "startDate and endDate are required".into(),
                ))
            }
        };

        Ok(Self {
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }

    /// Lower bound as stored text, at 00:00:00.
    pub fn start_bound(&self) -> String {
        format!("{}T00:00:00", self.start.format(DATE_FORMAT))
    }

    /// Upper bound as stored text, at 23:59:59.
    pub fn end_bound(&self) -> String {
        format!("{}T23:59:59", self.end.format(DATE_FORMAT))
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).map(|dt| dt.date()))
        .map_err(|_| AppError::Validation(format!("Invalid date: {}", s)))
}

/// Normalize a caller-supplied ledger date to the storage format. A bare
/// date is pinned to midnight.
pub fn normalize_datetime(s: &str) -> AppResult<String> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATETIME_FORMAT) {
        return Ok(dt.format(DATETIME_FORMAT).to_string());
    }
    let date = NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| AppError::Validation(format!("Invalid date: {}", s)))?;
    Ok(format!("{}T00:00:00", date.format(DATE_FORMAT)))
}

/// Day component of a stored timestamp, used to group report transaction
/// lists by date.
pub fn date_part(stored: &str) -> &str {
    stored.split('T').next().unwrap_or(stored)
}
