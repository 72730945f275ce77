use std::{
    collections::VecDeque,
    fs, io,
    path::{Path, PathBuf},
};

use gymlog_app::log;
use gymlog_domain as domain;
use ::log::warn;
use serde::{Serialize, de::DeserializeOwned};
use strum::AsRefStr;

use crate::document::Document;

/// Key-value store keeping one JSON file per key in a directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    #[strum(serialize = "gym-log-v1")]
    WorkoutLog,
    #[strum(serialize = "log")]
    Log,
}

#[derive(thiserror::Error, Debug)]
pub enum LocalStorageError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<LocalStorageError> for domain::StorageError {
    fn from(value: LocalStorageError) -> Self {
        match value {
            LocalStorageError::Io(err) => domain::StorageError::Io(err),
            LocalStorageError::Json(err) => domain::StorageError::Other(err.into()),
        }
    }
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: Key) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_ref()))
    }

    /// Read the value stored under `key`, or `None` if there is none.
    pub fn get<T: DeserializeOwned>(&self, key: Key) -> Result<Option<T>, LocalStorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Replace the value stored under `key`.
    ///
    /// The new content is written to a temporary file which then replaces
    /// the previous file, so readers never see a partially written value.
    pub fn set<T: Serialize>(&self, key: Key, value: &T) -> Result<(), LocalStorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string(value)?)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Move the value stored under `key` aside and return its new location.
    pub fn back_up(&self, key: Key) -> Result<PathBuf, io::Error> {
        let path = self.path(key);
        let backup_path = path.with_extension("json.bak");
        fs::rename(&path, &backup_path)?;
        Ok(backup_path)
    }
}

impl domain::DocumentRepository for LocalStorage {
    fn read_document(&self) -> Result<domain::Document, domain::ReadError> {
        match self.get::<Document>(Key::WorkoutLog) {
            Ok(document) => Ok(document.map(domain::Document::from).unwrap_or_default()),
            Err(LocalStorageError::Json(err)) => {
                let backup_path = self
                    .back_up(Key::WorkoutLog)
                    .map_err(domain::StorageError::Io)?;
                warn!(
                    "moved unreadable workout log to {}: {err}",
                    backup_path.display()
                );
                Ok(domain::Document::default())
            }
            Err(err) => Err(domain::StorageError::from(err).into()),
        }
    }

    fn write_document(&self, document: &domain::Document) -> Result<(), domain::UpdateError> {
        self.set(Key::WorkoutLog, &Document::from(document))
            .map_err(|err| domain::StorageError::from(err).into())
    }
}

impl log::Repository for LocalStorage {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.get(Key::Log)
            .map(Option::unwrap_or_default)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(log::MAX_ENTRIES);
        self.set(Key::Log, &entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
