use std::{
    cmp::Ordering,
    collections::{BTreeMap, btree_map::Entry},
};

use chrono::{Days, Months, NaiveDate};
use derive_more::Display;

use crate::{MuscleGroup, WorkoutLog};

/// A qualifying set of one exercise, positioned in time.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// 1-based position of the set within the exercise entry, counting all sets.
    pub set_index: usize,
    pub reps: f64,
    pub weight: f64,
}

impl TrendPoint {
    #[must_use]
    pub fn key(&self) -> String {
        point_key(self)
    }

    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} reps @ {} on {} (set {})",
            self.reps, self.weight, self.date, self.set_index
        )
    }
}

/// Identity of a point that survives recomputation of a series.
#[must_use]
pub fn point_key(point: &TrendPoint) -> String {
    format!(
        "{}|{}|{}|{}",
        point.date, point.set_index, point.reps, point.weight
    )
}

/// Collect all qualifying sets of an exercise in chronological order.
///
/// Exercise names are compared case-insensitively without any further
/// normalization. Several entries of the same exercise on one day contribute
/// their sets in entry order.
#[must_use]
pub fn compute_exercise_points(
    log: &WorkoutLog,
    group: MuscleGroup,
    exercise_name: &str,
) -> Vec<TrendPoint> {
    let target = exercise_name.to_lowercase();
    let mut points = vec![];

    for (date, day) in log.iter() {
        for exercise in day
            .exercises(group)
            .iter()
            .filter(|e| e.name.to_lowercase() == target)
        {
            for (i, set) in exercise.sets.iter().enumerate() {
                if let Some((reps, weight)) = set.qualifying() {
                    points.push(TrendPoint {
                        date: *date,
                        set_index: i + 1,
                        reps,
                        weight,
                    });
                }
            }
        }
    }

    points
}

#[derive(Debug, Clone, Copy, Default, Display, PartialEq, Eq)]
pub enum RangeMode {
    #[display("Week")]
    Week,
    #[default]
    #[display("Month")]
    Month,
    #[display("Year")]
    Year,
    #[display("Custom")]
    Custom,
}

impl RangeMode {
    /// Date window selected by the mode, or `None` if no filtering applies.
    ///
    /// A custom range with a missing bound or with its start after its end
    /// does not filter.
    #[must_use]
    pub fn interval(
        self,
        today: NaiveDate,
        custom_start: Option<NaiveDate>,
        custom_end: Option<NaiveDate>,
    ) -> Option<Interval> {
        let first = match self {
            RangeMode::Week => today.checked_sub_days(Days::new(7)),
            RangeMode::Month => today.checked_sub_months(Months::new(1)),
            RangeMode::Year => today.checked_sub_months(Months::new(12)),
            RangeMode::Custom => {
                return match (custom_start, custom_end) {
                    (Some(first), Some(last)) if first <= last => Some(Interval { first, last }),
                    _ => None,
                };
            }
        };
        Some(Interval {
            first: first.unwrap_or(NaiveDate::MIN),
            last: today,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, Display, PartialEq, Eq)]
pub enum DedupeMode {
    #[default]
    #[display("All sets")]
    All,
    #[display("Heaviest set")]
    Heaviest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl Interval {
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.first <= date && date <= self.last
    }
}

/// Restrict a chronological series to a date window and optionally to the heaviest set per day.
#[must_use]
pub fn filter_points(
    points: &[TrendPoint],
    range: RangeMode,
    custom_start: Option<NaiveDate>,
    custom_end: Option<NaiveDate>,
    dedupe: DedupeMode,
    today: NaiveDate,
) -> Vec<TrendPoint> {
    let interval = range.interval(today, custom_start, custom_end);
    let in_range = points
        .iter()
        .filter(|p| interval.is_none_or(|i| i.contains(p.date)))
        .cloned();

    match dedupe {
        DedupeMode::All => in_range.collect(),
        DedupeMode::Heaviest => heaviest_per_day(in_range),
    }
}

/// Keep the heaviest point of each day, more reps breaking ties.
///
/// If weight and reps are equal, the point seen last is kept.
fn heaviest_per_day(points: impl Iterator<Item = TrendPoint>) -> Vec<TrendPoint> {
    let mut heaviest: BTreeMap<NaiveDate, TrendPoint> = BTreeMap::new();

    for point in points {
        match heaviest.entry(point.date) {
            Entry::Vacant(entry) => {
                entry.insert(point);
            }
            Entry::Occupied(mut entry) => {
                let current = entry.get();
                let ordering = point
                    .weight
                    .total_cmp(&current.weight)
                    .then(point.reps.total_cmp(&current.reps));
                if ordering != Ordering::Less {
                    entry.insert(point);
                }
            }
        }
    }

    let mut result = heaviest.into_values().collect::<Vec<_>>();
    result.sort_by(|a, b| a.date.cmp(&b.date).then(a.set_index.cmp(&b.set_index)));
    result
}
