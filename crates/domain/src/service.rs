use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use log::{debug, error};

use crate::{
    DayEntry, Document, DocumentRepository, MuscleGroup, Name, PRRecord, PlotArea, ProgressSelection,
    ReadError, Theme, TrendProjection, UpdateError, compute_pr_records,
};

pub struct Service<R> {
    repository: R,
}

impl<R: DocumentRepository> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn get_document(&self) -> Result<Document, ReadError> {
        self.repository
            .read_document()
            .inspect_err(|err| error!("failed to read workout log: {err}"))
    }

    /// Load the document, apply `change` and store the result.
    ///
    /// Nothing is written if `change` fails.
    fn modify<T>(
        &self,
        action: &str,
        change: impl FnOnce(&mut Document) -> Result<T, UpdateError>,
    ) -> Result<T, UpdateError> {
        let result = self
            .repository
            .read_document()
            .map_err(UpdateError::from)
            .and_then(|mut document| {
                let value = change(&mut document)?;
                self.repository.write_document(&document)?;
                Ok(value)
            });
        match &result {
            Err(UpdateError::Storage(err)) => error!("failed to {action}: {err}"),
            Err(err) => debug!("failed to {action}: {err}"),
            Ok(_) => {}
        }
        result
    }

    /// Get the entry of a day, creating it if necessary.
    pub fn open_day(&self, date: NaiveDate) -> Result<DayEntry, UpdateError> {
        let document = self.get_document()?;
        if let Some(day) = document.workouts.day(date) {
            return Ok(day.clone());
        }
        self.modify("open day", |document| {
            Ok(document.workouts.ensure_day(date).clone())
        })
    }

    pub fn set_notes(&self, date: NaiveDate, notes: &str) -> Result<(), UpdateError> {
        self.modify("set notes", |document| {
            document.workouts.ensure_day(date).set_notes(notes);
            Ok(())
        })
    }

    /// Add an exercise to a day and remember its name in the catalog.
    ///
    /// A non-blank `new_name` takes precedence over `existing_name`.
    pub fn add_exercise(
        &self,
        date: NaiveDate,
        group: MuscleGroup,
        new_name: &str,
        existing_name: &str,
    ) -> Result<Name, UpdateError> {
        self.modify("add exercise", |document| {
            let name = Name::pick(new_name, existing_name)?;
            if document.catalog.add(group, &name) {
                debug!("added {name} to {group} catalog");
            }
            document.workouts.ensure_day(date).add_exercise(group, &name);
            Ok(name)
        })
    }

    pub fn remove_exercise(
        &self,
        date: NaiveDate,
        group: MuscleGroup,
        index: usize,
    ) -> Result<(), UpdateError> {
        self.modify("remove exercise", |document| {
            document
                .workouts
                .ensure_day(date)
                .remove_exercise(group, index)?;
            Ok(())
        })
    }

    pub fn add_set(
        &self,
        date: NaiveDate,
        group: MuscleGroup,
        index: usize,
    ) -> Result<usize, UpdateError> {
        self.modify("add set", |document| {
            Ok(document.workouts.ensure_day(date).add_set(group, index)?)
        })
    }

    pub fn update_reps(
        &self,
        date: NaiveDate,
        group: MuscleGroup,
        index: usize,
        set_index: usize,
        reps: &str,
    ) -> Result<(), UpdateError> {
        self.modify("update reps", |document| {
            Ok(document
                .workouts
                .ensure_day(date)
                .update_reps(group, index, set_index, reps)?)
        })
    }

    pub fn update_weight(
        &self,
        date: NaiveDate,
        group: MuscleGroup,
        index: usize,
        set_index: usize,
        weight: &str,
    ) -> Result<(), UpdateError> {
        self.modify("update weight", |document| {
            Ok(document
                .workouts
                .ensure_day(date)
                .update_weight(group, index, set_index, weight)?)
        })
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), UpdateError> {
        self.modify("set theme", |document| {
            document.settings.theme = theme;
            Ok(())
        })
    }

    pub fn get_pr_records(&self) -> Result<BTreeMap<MuscleGroup, Vec<PRRecord>>, ReadError> {
        Ok(compute_pr_records(&self.get_document()?.workouts))
    }

    /// Trend of the selected exercise as of today.
    pub fn get_progress(
        &self,
        selection: &ProgressSelection,
        area: &PlotArea,
    ) -> Result<Option<TrendProjection>, ReadError> {
        let document = self.get_document()?;
        Ok(selection.trend(&document.workouts, Local::now().date_naive(), area))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use pretty_assertions::assert_eq;

    use crate::{EditError, NameError, RangeMode, SetRecord, StorageError};

    use super::*;

    #[derive(Default)]
    struct Repository {
        document: RefCell<Document>,
        writes: Cell<usize>,
        fail: bool,
    }

    impl Repository {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }
    }

    impl DocumentRepository for Repository {
        fn read_document(&self) -> Result<Document, ReadError> {
            if self.fail {
                return Err(StorageError::Other("unavailable".into()).into());
            }
            Ok(self.document.borrow().clone())
        }

        fn write_document(&self, document: &Document) -> Result<(), UpdateError> {
            if self.fail {
                return Err(StorageError::Other("unavailable".into()).into());
            }
            *self.document.borrow_mut() = document.clone();
            self.writes.set(self.writes.get() + 1);
            Ok(())
        }
    }

    const DATE: NaiveDate = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    #[test]
    fn test_open_day() {
        let service = Service::new(Repository::default());
        let day = service.open_day(DATE).unwrap();
        assert!(day.is_empty());
        assert_eq!(service.repository.writes.get(), 1);
        assert!(service.get_document().unwrap().workouts.has_data(DATE));

        service.open_day(DATE).unwrap();
        assert_eq!(service.repository.writes.get(), 1);
    }

    #[test]
    fn test_log_workout() {
        let service = Service::new(Repository::default());
        service.set_notes(DATE, "push day").unwrap();
        let name = service
            .add_exercise(DATE, MuscleGroup::Chest, "  Bench Press ", "")
            .unwrap();
        assert_eq!(name.to_string(), "Bench Press");
        assert_eq!(service.add_set(DATE, MuscleGroup::Chest, 0).unwrap(), 0);
        service
            .update_reps(DATE, MuscleGroup::Chest, 0, 0, "5")
            .unwrap();
        service
            .update_weight(DATE, MuscleGroup::Chest, 0, 0, "100")
            .unwrap();

        let document = service.get_document().unwrap();
        let day = document.workouts.day(DATE).unwrap();
        assert_eq!(day.notes, "push day");
        assert_eq!(day.exercises(MuscleGroup::Chest)[0].sets, vec![SetRecord::new("5", "100")]);
        assert_eq!(
            document.catalog.names(MuscleGroup::Chest),
            &["Bench Press".to_string()]
        );

        let records = service.get_pr_records().unwrap();
        assert_eq!(records[&MuscleGroup::Chest][0].weight, 100.);
    }

    #[test]
    fn test_add_exercise_from_catalog() {
        let service = Service::new(Repository::default());
        service
            .add_exercise(DATE, MuscleGroup::Back, "Row", "")
            .unwrap();
        service
            .add_exercise(DATE, MuscleGroup::Back, "", "row")
            .unwrap();

        let document = service.get_document().unwrap();
        assert_eq!(document.catalog.names(MuscleGroup::Back), &["Row".to_string()]);
        assert_eq!(
            document
                .workouts
                .day(DATE)
                .unwrap()
                .exercises(MuscleGroup::Back)
                .iter()
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>(),
            vec!["Row", "row"]
        );
    }

    #[test]
    fn test_invalid_changes_are_not_written() {
        let service = Service::new(Repository::default());
        assert!(matches!(
            service.add_exercise(DATE, MuscleGroup::Back, " ", ""),
            Err(UpdateError::Name(NameError::Empty))
        ));
        assert!(matches!(
            service.remove_exercise(DATE, MuscleGroup::Back, 0),
            Err(UpdateError::Edit(EditError::ExerciseNotFound(MuscleGroup::Back, 0)))
        ));
        assert_eq!(service.repository.writes.get(), 0);
        assert_eq!(service.get_document().unwrap(), Document::default());
    }

    #[test]
    fn test_set_theme() {
        let service = Service::new(Repository::default());
        service.set_theme(Theme::Dark).unwrap();
        assert_eq!(service.get_document().unwrap().settings.theme, Theme::Dark);
    }

    #[test]
    fn test_get_progress() {
        let service = Service::new(Repository::default());
        service
            .add_exercise(DATE, MuscleGroup::Quads, "Squat", "")
            .unwrap();
        service.add_set(DATE, MuscleGroup::Quads, 0).unwrap();
        service
            .update_reps(DATE, MuscleGroup::Quads, 0, 0, "5")
            .unwrap();
        service
            .update_weight(DATE, MuscleGroup::Quads, 0, 0, "140")
            .unwrap();

        let mut selection = ProgressSelection::new(MuscleGroup::Quads, "squat");
        selection.range = RangeMode::Custom;
        let trend = service
            .get_progress(&selection, &PlotArea::default())
            .unwrap()
            .unwrap();
        assert_eq!(trend.summary(), "5 reps @ 140 on 2024-01-01 (set 1)");

        selection.exercise_name = "Lunge".to_string();
        assert_eq!(
            service
                .get_progress(&selection, &PlotArea::default())
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_storage_errors() {
        let service = Service::new(Repository::failing());
        assert!(matches!(
            service.get_document(),
            Err(ReadError::Storage(StorageError::Other(_)))
        ));
        assert!(matches!(
            service.set_notes(DATE, "notes"),
            Err(UpdateError::Storage(StorageError::Other(_)))
        ));
        assert!(service.get_pr_records().is_err());
    }
}
