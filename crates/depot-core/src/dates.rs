// ── Date-range normalization ──

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use depot_api::Filters;

/// An inclusive range of calendar days, either bound optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Bounds in ascending order; a reversed pair is swapped.
    pub fn ordered(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        match (self.from, self.to) {
            (Some(a), Some(b)) if a > b => (Some(b), Some(a)),
            other => other,
        }
    }

    /// `from` at 00:00:00.000 UTC, `to` at 23:59:59.999 UTC.
    pub fn instants(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let (from, to) = self.ordered();
        (from.map(start_of_day), to.and_then(end_of_day))
    }

    /// Add `startDate` / `endDate` to `filters`.
    pub fn apply(&self, filters: &mut Filters) {
        let (start, end) = self.instants();
        filters.set_opt("startDate", start);
        filters.set_opt("endDate", end);
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .map(|dt| dt.and_utc())
}
