use crate::{Catalog, ReadError, Settings, UpdateError, WorkoutLog};

pub trait DocumentRepository {
    fn read_document(&self) -> Result<Document, ReadError>;
    fn write_document(&self, document: &Document) -> Result<(), UpdateError>;
}

/// Everything the application persists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub workouts: WorkoutLog,
    pub catalog: Catalog,
    pub settings: Settings,
}
