use chrono::{Datelike as _, Duration, NaiveDate};
use fractic_server_error::ServerError;

use crate::{
    entities::{DateRange, PeriodFilter, Transaction},
    errors::{InvalidDateRange, InvalidIsoDate},
};

fn parse_iso_date(s: &str) -> Result<NaiveDate, ServerError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| InvalidIsoDate::with_debug(s, &e))
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ServerError> {
        if start > end {
            return Err(InvalidDateRange::new(&start.to_string(), &end.to_string()));
        }
        Ok(Self { start, end })
    }

    /// Parses a range from two `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ServerError> {
        Self::new(parse_iso_date(start)?, parse_iso_date(end)?)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Single-day range.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }
}

impl PeriodFilter {
    /// Resolves the filter to a concrete range relative to `today`. `None` for
    /// `All`.
    pub fn range(&self, today: NaiveDate) -> Option<DateRange> {
        match self {
            PeriodFilter::ThisWeek => {
                let start =
                    today - Duration::days(today.weekday().num_days_from_sunday() as i64);
                Some(DateRange {
                    start,
                    end: start + Duration::days(6),
                })
            }
            PeriodFilter::ThisMonth => {
                let start = today.with_day(1)?;
                let (year, month) = if today.month() == 12 {
                    (today.year() + 1, 1)
                } else {
                    (today.year(), today.month() + 1)
                };
                let next_month_start = NaiveDate::from_ymd_opt(year, month, 1)?;
                Some(DateRange {
                    start,
                    end: next_month_start - Duration::days(1),
                })
            }
            PeriodFilter::Custom(range) => Some(*range),
            PeriodFilter::All => None,
        }
    }

    pub fn matches(&self, date: NaiveDate, today: NaiveDate) -> bool {
        self.range(today).map_or(true, |r| r.contains(date))
    }

    pub fn apply<'a>(
        &self,
        transactions: &'a [Transaction],
        today: NaiveDate,
    ) -> Vec<&'a Transaction> {
        let range = self.range(today);
        transactions
            .iter()
            .filter(|t| range.map_or(true, |r| r.contains(t.date)))
            .collect()
    }
}
