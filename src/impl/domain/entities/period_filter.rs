use chrono::NaiveDate;

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Time window applied to the transaction list before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodFilter {
    /// Sunday through Saturday of the week containing "today".
    ThisWeek,
    #[default]
    ThisMonth,
    Custom(DateRange),
    All,
}
