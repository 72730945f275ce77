use chrono::NaiveDate;

use crate::{
    DedupeMode, MuscleGroup, PRRecord, PlotArea, RangeMode, TrendPoint, TrendProjection,
    WorkoutLog, compute_exercise_points, filter_points, project_trend,
};

/// State of the progress view.
///
/// The selection is owned by the caller and handed to the queries; nothing in
/// the analytics keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSelection {
    pub group: MuscleGroup,
    pub exercise_name: String,
    pub range: RangeMode,
    pub dedupe: DedupeMode,
    pub custom_start: Option<NaiveDate>,
    pub custom_end: Option<NaiveDate>,
    pub selected_point_key: Option<String>,
}

impl ProgressSelection {
    #[must_use]
    pub fn new(group: MuscleGroup, exercise_name: &str) -> Self {
        Self {
            group,
            exercise_name: exercise_name.to_string(),
            range: RangeMode::default(),
            dedupe: DedupeMode::default(),
            custom_start: None,
            custom_end: None,
            selected_point_key: None,
        }
    }

    /// Switch to another exercise, keeping range and mode.
    pub fn select_exercise(&mut self, group: MuscleGroup, exercise_name: &str) {
        self.group = group;
        exercise_name.clone_into(&mut self.exercise_name);
        self.selected_point_key = None;
    }

    pub fn select_point(&mut self, point: &TrendPoint) {
        self.selected_point_key = Some(point.key());
    }

    #[must_use]
    pub fn points(&self, log: &WorkoutLog, today: NaiveDate) -> Vec<TrendPoint> {
        filter_points(
            &compute_exercise_points(log, self.group, &self.exercise_name),
            self.range,
            self.custom_start,
            self.custom_end,
            self.dedupe,
            today,
        )
    }

    /// Project the selected series, or `None` if there is no data in the selected range.
    #[must_use]
    pub fn trend(
        &self,
        log: &WorkoutLog,
        today: NaiveDate,
        area: &PlotArea,
    ) -> Option<TrendProjection> {
        project_trend(
            &self.points(log, today),
            self.selected_point_key.as_deref(),
            area,
        )
    }
}

impl From<&PRRecord> for ProgressSelection {
    fn from(value: &PRRecord) -> Self {
        Self::new(value.group, &value.exercise_name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{DayEntry, Exercise, SetRecord};

    use super::*;

    fn date(day: &str) -> NaiveDate {
        NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap()
    }

    fn workout_log() -> WorkoutLog {
        [
            ("2024-01-01", vec![("5", "100"), ("5", "105")]),
            ("2024-02-01", vec![("5", "120"), ("3", "125")]),
            ("2024-02-10", vec![("8", "110")]),
        ]
        .into_iter()
        .map(|(day, sets)| {
            (
                date(day),
                DayEntry::new(
                    String::new(),
                    [(
                        MuscleGroup::Chest,
                        vec![Exercise {
                            name: "Bench Press".to_string(),
                            sets: sets
                                .into_iter()
                                .map(|(reps, weight)| SetRecord::new(reps, weight))
                                .collect(),
                        }],
                    )],
                ),
            )
        })
        .collect()
    }

    #[test]
    fn test_progress_selection_points() {
        let mut selection = ProgressSelection::new(MuscleGroup::Chest, "bench press");
        assert_eq!(selection.points(&workout_log(), date("2024-02-15")).len(), 3);

        selection.dedupe = DedupeMode::Heaviest;
        assert_eq!(
            selection
                .points(&workout_log(), date("2024-02-15"))
                .iter()
                .map(|p| p.weight)
                .collect::<Vec<_>>(),
            vec![125., 110.]
        );

        selection.range = RangeMode::Custom;
        selection.custom_start = Some(date("2024-01-01"));
        selection.custom_end = Some(date("2024-01-31"));
        assert_eq!(
            selection
                .points(&workout_log(), date("2024-02-15"))
                .iter()
                .map(|p| p.weight)
                .collect::<Vec<_>>(),
            vec![105.]
        );
    }

    #[test]
    fn test_progress_selection_trend_keeps_selected_point() {
        let log = workout_log();
        let today = date("2024-02-15");
        let mut selection = ProgressSelection::new(MuscleGroup::Chest, "Bench Press");

        let trend = selection.trend(&log, today, &PlotArea::default()).unwrap();
        assert_eq!(trend.selected_point().point.weight, 110.);

        let first = trend.points[0].point.clone();
        selection.select_point(&first);
        let trend = selection.trend(&log, today, &PlotArea::default()).unwrap();
        assert_eq!(trend.selected_point().point, first);

        selection.range = RangeMode::Week;
        let trend = selection.trend(&log, today, &PlotArea::default()).unwrap();
        assert_eq!(trend.points.len(), 1);
        assert_eq!(trend.selected_point().point.weight, 110.);
    }

    #[test]
    fn test_progress_selection_trend_without_data() {
        let mut selection = ProgressSelection::new(MuscleGroup::Chest, "Bench Press");
        selection.range = RangeMode::Week;
        assert_eq!(
            selection.trend(&workout_log(), date("2025-01-01"), &PlotArea::default()),
            None
        );
    }

    #[test]
    fn test_progress_selection_select_exercise() {
        let mut selection = ProgressSelection::new(MuscleGroup::Chest, "Bench Press");
        selection.range = RangeMode::Year;
        selection.selected_point_key = Some("2024-01-01|1|5|100".to_string());
        selection.select_exercise(MuscleGroup::Back, "Row");
        assert_eq!(
            selection,
            ProgressSelection {
                group: MuscleGroup::Back,
                exercise_name: "Row".to_string(),
                range: RangeMode::Year,
                dedupe: DedupeMode::All,
                custom_start: None,
                custom_end: None,
                selected_point_key: None,
            }
        );
    }

    #[test]
    fn test_progress_selection_from_pr_record() {
        let record = PRRecord {
            group: MuscleGroup::Quads,
            exercise_name: "Squat".to_string(),
            weight: 140.,
            reps: 3.,
            date: date("2024-01-01"),
        };
        assert_eq!(
            ProgressSelection::from(&record),
            ProgressSelection::new(MuscleGroup::Quads, "Squat")
        );
    }
}
