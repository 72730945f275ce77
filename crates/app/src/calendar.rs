use chrono::{Datelike, Days, Months, NaiveDate};
use gymlog_domain as domain;

pub const GRID_SIZE: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_month: bool,
    pub has_data: bool,
    pub selected: bool,
}

/// Month shown in the calendar and the day being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    month: NaiveDate,
    pub selected: NaiveDate,
}

impl Calendar {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            month: first_of_month(today),
            selected: today,
        }
    }

    /// First day of the displayed month.
    #[must_use]
    pub fn month(&self) -> NaiveDate {
        self.month
    }

    #[must_use]
    pub fn label(&self) -> String {
        self.month.format("%B %Y").to_string()
    }

    pub fn prev_month(&mut self) {
        self.month = prev_month(self.month);
    }

    pub fn next_month(&mut self) {
        self.month = next_month(self.month);
    }

    /// Select a day and show its month.
    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
        self.month = first_of_month(date);
    }

    #[must_use]
    pub fn days(&self, log: &domain::WorkoutLog) -> Vec<CalendarDay> {
        month_grid(self.month)
            .into_iter()
            .map(|(date, in_month)| CalendarDay {
                date,
                in_month,
                has_data: log.has_data(date),
                selected: date == self.selected,
            })
            .collect()
    }
}

/// Six weeks of days starting on the Sunday on or before the first of the month.
#[must_use]
pub fn month_grid(month: NaiveDate) -> Vec<(NaiveDate, bool)> {
    let first = first_of_month(month);
    let offset = first.weekday().num_days_from_sunday();
    let start = first
        .checked_sub_days(Days::new(offset.into()))
        .unwrap_or(first);
    start
        .iter_days()
        .take(GRID_SIZE)
        .map(|date| (date, date.month() == first.month() && date.year() == first.year()))
        .collect()
}

#[must_use]
pub fn prev_month(month: NaiveDate) -> NaiveDate {
    let first = first_of_month(month);
    first.checked_sub_months(Months::new(1)).unwrap_or(first)
}

#[must_use]
pub fn next_month(month: NaiveDate) -> NaiveDate {
    let first = first_of_month(month);
    first.checked_add_months(Months::new(1)).unwrap_or(first)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
