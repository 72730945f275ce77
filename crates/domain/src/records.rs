use std::{
    cmp::Ordering,
    collections::{BTreeMap, btree_map::Entry},
};

use chrono::NaiveDate;

use crate::{MuscleGroup, SetRecord, WorkoutLog};

/// Best qualifying set of an exercise across the whole log.
#[derive(Debug, Clone, PartialEq)]
pub struct PRRecord {
    pub group: MuscleGroup,
    pub exercise_name: String,
    pub weight: f64,
    pub reps: f64,
    pub date: NaiveDate,
}

impl PRRecord {
    /// Whether `self` is a better set than `other`: heavier, or as heavy with more reps.
    #[must_use]
    pub fn beats(&self, other: &PRRecord) -> bool {
        self.weight
            .total_cmp(&other.weight)
            .then(self.reps.total_cmp(&other.reps))
            == Ordering::Greater
    }
}

/// Determine the personal record of every exercise, grouped by muscle group.
///
/// Exercises are identified by muscle group and case-folded name. The
/// displayed name is taken from the entry of the winning set. Sets with the
/// same weight and reps do not replace each other, so on a full tie the
/// earliest set wins (days are visited chronologically, exercises and sets in
/// entry order).
///
/// Every muscle group is contained in the result. The records of a group are
/// ordered by case-folded exercise name.
#[must_use]
pub fn compute_pr_records(log: &WorkoutLog) -> BTreeMap<MuscleGroup, Vec<PRRecord>> {
    let mut best: BTreeMap<(MuscleGroup, String), PRRecord> = BTreeMap::new();

    for (date, day) in log.iter() {
        for (group, exercises) in day.muscles() {
            for exercise in exercises {
                for (reps, weight) in exercise.sets.iter().filter_map(SetRecord::qualifying) {
                    let candidate = PRRecord {
                        group,
                        exercise_name: exercise.name.clone(),
                        weight,
                        reps,
                        date: *date,
                    };
                    match best.entry((group, exercise.name.to_lowercase())) {
                        Entry::Vacant(entry) => {
                            entry.insert(candidate);
                        }
                        Entry::Occupied(mut entry) => {
                            if candidate.beats(entry.get()) {
                                entry.insert(candidate);
                            }
                        }
                    }
                }
            }
        }
    }

    let mut result = MuscleGroup::iter()
        .map(|group| (*group, vec![]))
        .collect::<BTreeMap<_, Vec<PRRecord>>>();

    for ((group, _), record) in best {
        result.entry(group).or_default().push(record);
    }

    result
}
