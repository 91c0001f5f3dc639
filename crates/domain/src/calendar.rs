use chrono::{Datelike, Days, NaiveDate, Weekday};

/// First date on or after `today` that falls on `weekday`.
#[must_use]
pub fn next_occurrence(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let offset =
        (weekday.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7;
    today + Days::new(u64::from(offset))
}

/// Closed range of dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl Interval {
    /// The seven days starting with `today`.
    #[must_use]
    pub fn planning_window(today: NaiveDate) -> Self {
        Self {
            first: today,
            last: today + Days::new(6),
        }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }
}
