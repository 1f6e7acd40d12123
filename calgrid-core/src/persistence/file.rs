//! File-backed gateway: one JSON document per key in a data directory.

use std::path::{Path, PathBuf};

use super::{PersistenceGateway, STORAGE_KEY, decode, encode};
use crate::error::CalGridResult;
use crate::event::Event;

#[derive(Debug, Clone)]
pub struct FileGateway {
    dir: PathBuf,
    key: String,
}

impl FileGateway {
    /// Gateway storing the collection under [`STORAGE_KEY`] in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_key(dir, STORAGE_KEY)
    }

    pub fn with_key(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        FileGateway {
            dir: dir.into(),
            key: key.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document holding the collection
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }
}

impl PersistenceGateway for FileGateway {
    fn load(&self) -> CalGridResult<Vec<Event>> {
        let path = self.path();

        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&path)?;
        decode(&content)
    }

    fn save(&self, events: &[Event]) -> CalGridResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.path();
        let temp = self.dir.join(format!("{}.json.tmp", self.key));

        std::fs::write(&temp, encode(events)?)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}
