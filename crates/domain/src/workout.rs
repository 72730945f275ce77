use std::collections::BTreeMap;

use chrono::NaiveDate;
use derive_more::Deref;

use crate::{MuscleGroup, Name};

/// Workout days keyed by calendar date.
///
/// Days are created on first access and are never removed automatically,
/// even if all their exercises are deleted again.
#[derive(Deref, Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutLog(BTreeMap<NaiveDate, DayEntry>);

impl WorkoutLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure_day(&mut self, date: NaiveDate) -> &mut DayEntry {
        self.0.entry(date).or_default()
    }

    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&DayEntry> {
        self.0.get(&date)
    }

    pub fn day_mut(&mut self, date: NaiveDate) -> Option<&mut DayEntry> {
        self.0.get_mut(&date)
    }

    #[must_use]
    pub fn has_data(&self, date: NaiveDate) -> bool {
        self.0.contains_key(&date)
    }
}

impl FromIterator<(NaiveDate, DayEntry)> for WorkoutLog {
    fn from_iter<T: IntoIterator<Item = (NaiveDate, DayEntry)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
    pub notes: String,
    muscles: BTreeMap<MuscleGroup, Vec<Exercise>>,
}

impl DayEntry {
    /// Create a day entry. Muscle groups missing in `muscles` are added with no exercises.
    pub fn new(notes: String, muscles: impl IntoIterator<Item = (MuscleGroup, Vec<Exercise>)>) -> Self {
        let mut all = MuscleGroup::iter()
            .map(|group| (*group, vec![]))
            .collect::<BTreeMap<_, _>>();
        all.extend(muscles);
        Self {
            notes,
            muscles: all,
        }
    }

    #[must_use]
    pub fn exercises(&self, group: MuscleGroup) -> &[Exercise] {
        self.muscles.get(&group).map_or(&[][..], Vec::as_slice)
    }

    /// All muscle groups with their exercises in display order.
    pub fn muscles(&self) -> impl Iterator<Item = (MuscleGroup, &[Exercise])> {
        self.muscles
            .iter()
            .map(|(group, exercises)| (*group, exercises.as_slice()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty() && self.muscles.values().all(Vec::is_empty)
    }

    pub fn set_notes(&mut self, notes: &str) {
        notes.clone_into(&mut self.notes);
    }

    /// Append an exercise without sets and return its position.
    pub fn add_exercise(&mut self, group: MuscleGroup, name: &Name) -> usize {
        let exercises = self.muscles.entry(group).or_default();
        exercises.push(Exercise::new(name));
        exercises.len() - 1
    }

    pub fn remove_exercise(&mut self, group: MuscleGroup, index: usize) -> Result<Exercise, EditError> {
        let exercises = self.muscles.entry(group).or_default();
        if index >= exercises.len() {
            return Err(EditError::ExerciseNotFound(group, index));
        }
        Ok(exercises.remove(index))
    }

    /// Append an empty set and return its position.
    pub fn add_set(&mut self, group: MuscleGroup, index: usize) -> Result<usize, EditError> {
        let exercise = self.exercise_mut(group, index)?;
        exercise.sets.push(SetRecord::default());
        Ok(exercise.sets.len() - 1)
    }

    pub fn update_reps(
        &mut self,
        group: MuscleGroup,
        index: usize,
        set_index: usize,
        reps: &str,
    ) -> Result<(), EditError> {
        reps.clone_into(&mut self.set_mut(group, index, set_index)?.reps);
        Ok(())
    }

    pub fn update_weight(
        &mut self,
        group: MuscleGroup,
        index: usize,
        set_index: usize,
        weight: &str,
    ) -> Result<(), EditError> {
        weight.clone_into(&mut self.set_mut(group, index, set_index)?.weight);
        Ok(())
    }

    fn exercise_mut(&mut self, group: MuscleGroup, index: usize) -> Result<&mut Exercise, EditError> {
        self.muscles
            .entry(group)
            .or_default()
            .get_mut(index)
            .ok_or(EditError::ExerciseNotFound(group, index))
    }

    fn set_mut(
        &mut self,
        group: MuscleGroup,
        index: usize,
        set_index: usize,
    ) -> Result<&mut SetRecord, EditError> {
        self.exercise_mut(group, index)?
            .sets
            .get_mut(set_index)
            .ok_or(EditError::SetNotFound(set_index))
    }
}

impl Default for DayEntry {
    fn default() -> Self {
        Self::new(String::new(), std::iter::empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
    pub sets: Vec<SetRecord>,
}

impl Exercise {
    #[must_use]
    pub fn new(name: &Name) -> Self {
        Self {
            name: name.to_string(),
            sets: vec![],
        }
    }
}

/// A set as typed by the user.
///
/// Both values are kept as raw text, so incomplete input survives editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetRecord {
    pub reps: String,
    pub weight: String,
}

impl SetRecord {
    #[must_use]
    pub fn new(reps: &str, weight: &str) -> Self {
        Self {
            reps: reps.to_string(),
            weight: weight.to_string(),
        }
    }

    /// Reps and weight of the set, if both are finite numbers greater than zero.
    #[must_use]
    pub fn qualifying(&self) -> Option<(f64, f64)> {
        Some((parse_positive(&self.reps)?, parse_positive(&self.weight)?))
    }

    #[must_use]
    pub fn is_qualifying(&self) -> bool {
        self.qualifying().is_some()
    }
}

fn parse_positive(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EditError {
    #[error("No {group} exercise at position {position}", group = .0, position = .1 + 1)]
    ExerciseNotFound(MuscleGroup, usize),
    #[error("No set at position {position}", position = .0 + 1)]
    SetNotFound(usize),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    const DATE: NaiveDate = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    #[rstest]
    #[case("5", "100", Some((5.0, 100.0)))]
    #[case(" 8 ", "62.5", Some((8.0, 62.5)))]
    #[case("1e1", "0.5", Some((10.0, 0.5)))]
    #[case("", "100", None)]
    #[case("5", "", None)]
    #[case("0", "100", None)]
    #[case("5", "0", None)]
    #[case("-3", "100", None)]
    #[case("5", "-20", None)]
    #[case("five", "100", None)]
    #[case("5", "inf", None)]
    #[case("NaN", "100", None)]
    fn test_set_record_qualifying(
        #[case] reps: &str,
        #[case] weight: &str,
        #[case] expected: Option<(f64, f64)>,
    ) {
        let set = SetRecord::new(reps, weight);
        assert_eq!(set.qualifying(), expected);
        assert_eq!(set.is_qualifying(), expected.is_some());
    }

    #[test]
    fn test_set_record_qualifying_follows_current_values() {
        let mut set = SetRecord::new("5", "");
        assert!(!set.is_qualifying());
        set.weight = "80".to_string();
        assert!(set.is_qualifying());
        set.reps = "0".to_string();
        assert!(!set.is_qualifying());
    }

    #[test]
    fn test_day_entry_contains_all_muscle_groups() {
        let day = DayEntry::default();
        assert_eq!(
            day.muscles().map(|(group, _)| group).collect::<Vec<_>>(),
            MuscleGroup::iter().copied().collect::<Vec<_>>()
        );
        assert!(day.muscles().all(|(_, exercises)| exercises.is_empty()));
        assert!(day.is_empty());
    }

    #[test]
    fn test_day_entry_new_fills_missing_muscle_groups() {
        let squat = Exercise::new(&Name::new("Squat").unwrap());
        let day = DayEntry::new(
            "legs".to_string(),
            [(MuscleGroup::Quads, vec![squat.clone()])],
        );
        assert_eq!(day.muscles().count(), 11);
        assert_eq!(day.exercises(MuscleGroup::Quads), &[squat]);
        assert!(day.exercises(MuscleGroup::Chest).is_empty());
        assert!(!day.is_empty());
    }

    #[test]
    fn test_workout_log_ensure_day() {
        let mut log = WorkoutLog::new();
        assert!(!log.has_data(DATE));

        log.ensure_day(DATE).set_notes("heavy day");
        assert!(log.has_data(DATE));
        assert_eq!(log.day(DATE).unwrap().notes, "heavy day");

        log.ensure_day(DATE);
        assert_eq!(log.len(), 1);
        assert_eq!(log.day(DATE).unwrap().notes, "heavy day");
    }

    #[test]
    fn test_workout_log_keeps_emptied_day() {
        let mut log = WorkoutLog::new();
        let day = log.ensure_day(DATE);
        let index = day.add_exercise(MuscleGroup::Chest, &Name::new("Bench Press").unwrap());
        day.remove_exercise(MuscleGroup::Chest, index).unwrap();
        assert!(log.has_data(DATE));
        assert!(log.day(DATE).unwrap().is_empty());
    }

    #[test]
    fn test_day_entry_edit_sets() {
        let mut day = DayEntry::default();
        let name = Name::new("Bench Press").unwrap();
        assert_eq!(day.add_exercise(MuscleGroup::Chest, &name), 0);
        assert_eq!(day.add_exercise(MuscleGroup::Chest, &name), 1);
        assert_eq!(day.add_set(MuscleGroup::Chest, 1), Ok(0));
        assert_eq!(day.add_set(MuscleGroup::Chest, 1), Ok(1));
        day.update_reps(MuscleGroup::Chest, 1, 1, "5").unwrap();
        day.update_weight(MuscleGroup::Chest, 1, 1, "100").unwrap();

        assert_eq!(
            day.exercises(MuscleGroup::Chest),
            &[
                Exercise {
                    name: "Bench Press".to_string(),
                    sets: vec![]
                },
                Exercise {
                    name: "Bench Press".to_string(),
                    sets: vec![SetRecord::default(), SetRecord::new("5", "100")]
                }
            ]
        );
    }

    #[test]
    fn test_day_entry_edit_errors() {
        let mut day = DayEntry::default();
        assert_eq!(
            day.add_set(MuscleGroup::Back, 0),
            Err(EditError::ExerciseNotFound(MuscleGroup::Back, 0))
        );
        assert_eq!(
            day.remove_exercise(MuscleGroup::Back, 0),
            Err(EditError::ExerciseNotFound(MuscleGroup::Back, 0))
        );
        day.add_exercise(MuscleGroup::Back, &Name::new("Row").unwrap());
        assert_eq!(
            day.update_reps(MuscleGroup::Back, 0, 0, "5"),
            Err(EditError::SetNotFound(0))
        );
        assert_eq!(
            day.update_weight(MuscleGroup::Back, 1, 0, "5"),
            Err(EditError::ExerciseNotFound(MuscleGroup::Back, 1))
        );
    }

    #[test]
    fn test_day_entry_remove_exercise() {
        let mut day = DayEntry::default();
        day.add_exercise(MuscleGroup::Abs, &Name::new("Crunch").unwrap());
        day.add_exercise(MuscleGroup::Abs, &Name::new("Plank").unwrap());
        let removed = day.remove_exercise(MuscleGroup::Abs, 0).unwrap();
        assert_eq!(removed.name, "Crunch");
        assert_eq!(day.exercises(MuscleGroup::Abs)[0].name, "Plank");
    }

    #[rstest]
    #[case(EditError::ExerciseNotFound(MuscleGroup::Back, 0), "No back exercise at position 1")]
    #[case(EditError::ExerciseNotFound(MuscleGroup::Calves, 2), "No calves exercise at position 3")]
    #[case(EditError::SetNotFound(4), "No set at position 5")]
    fn test_edit_error_display(#[case] error: EditError, #[case] message: &str) {
        assert_eq!(error.to_string(), message);
    }
}
