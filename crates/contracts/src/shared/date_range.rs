use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive report date range, ISO `YYYY-MM-DD` on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse and validate a pair of ISO date strings
    pub fn parse(start: &str, end: &str) -> anyhow::Result<Self> {
        let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("invalid start date '{}': {}", start, e))?;
        let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("invalid end date '{}': {}", end, e))?;
        Ok(Self { start, end })
    }

    /// First and last day of the month containing `today`
    pub fn current_month(today: NaiveDate) -> Self {
        let start = today.with_day(1).unwrap_or(today);
        let end = last_day_of_month(today.year(), today.month());
        Self { start, end }
    }

    pub fn start_iso(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_iso(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

/// Calculate the last day of a month
fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let days = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0) {
                29
            } else {
                28
            }
        }
        _ => 31,
    };
    NaiveDate::from_ymd_opt(year, month, days)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap())
}
