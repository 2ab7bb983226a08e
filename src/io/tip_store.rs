use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::model::tip::{TipDisplayRecord, TipId};

/// Error type for tip datastore operations
#[derive(Debug, thiserror::Error)]
pub enum DatastoreError {
    #[error("could not access {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("could not encode tip records: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persistence for per-tip display history
pub trait TipDatastore {
    fn load_all(&self) -> Result<BTreeMap<TipId, TipDisplayRecord>, DatastoreError>;
    fn save(&mut self, id: TipId, record: &TipDisplayRecord) -> Result<(), DatastoreError>;
    fn clear(&mut self) -> Result<(), DatastoreError>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Store that forgets everything when dropped
#[derive(Debug, Default, Clone)]
pub struct MemoryTipStore {
    records: BTreeMap<TipId, TipDisplayRecord>,
}

impl MemoryTipStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TipDatastore for MemoryTipStore {
    fn load_all(&self) -> Result<BTreeMap<TipId, TipDisplayRecord>, DatastoreError> {
        Ok(self.records.clone())
    }

    fn save(&mut self, id: TipId, record: &TipDisplayRecord) -> Result<(), DatastoreError> {
        self.records.insert(id, record.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DatastoreError> {
        self.records.clear();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JSON file store
// ---------------------------------------------------------------------------

/// On-disk layout of tips.json
#[derive(Debug, Default, Serialize, Deserialize)]
struct TipsFile {
    #[serde(default)]
    tips: BTreeMap<TipId, TipDisplayRecord>,
}

/// Store backed by `tips.json` in the data directory
#[derive(Debug, Clone)]
pub struct JsonTipStore {
    path: PathBuf,
}

impl JsonTipStore {
    pub const FILE_NAME: &'static str = "tips.json";

    pub fn new(data_dir: &Path) -> Self {
        JsonTipStore {
            path: data_dir.join(Self::FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> DatastoreError {
        DatastoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write(&self, file: &TipsFile) -> Result<(), DatastoreError> {
        let content = serde_json::to_string_pretty(file)?;
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| self.io_err(e))?;
        }
        atomic_write(&self.path, content.as_bytes()).map_err(|e| self.io_err(e))
    }
}

impl TipDatastore for JsonTipStore {
    /// A missing file is an empty store. A corrupted file is backed up as
    /// `tips.json.bak` and treated as empty.
    fn load_all(&self) -> Result<BTreeMap<TipId, TipDisplayRecord>, DatastoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_err(e)),
        };
        match serde_json::from_str::<TipsFile>(&content) {
            Ok(file) => Ok(file.tips),
            Err(e) => {
                let bak = self.path.with_extension("json.bak");
                match fs::copy(&self.path, &bak) {
                    Ok(_) => tracing::warn!(
                        path = %self.path.display(),
                        backup = %bak.display(),
                        error = %e,
                        "could not parse tip records, starting fresh"
                    ),
                    Err(copy_err) => tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        backup_error = %copy_err,
                        "could not parse tip records or back them up, starting fresh"
                    ),
                }
                Ok(BTreeMap::new())
            }
        }
    }

    fn save(&mut self, id: TipId, record: &TipDisplayRecord) -> Result<(), DatastoreError> {
        let tips = self.load_all()?;
        let mut file = TipsFile { tips };
        file.tips.insert(id, record.clone());
        self.write(&file)
    }

    fn clear(&mut self) -> Result<(), DatastoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_err(e)),
        }
    }
}

/// Store for the front end: JSON in `data_dir`, or memory when ephemeral
pub fn open(data_dir: &Path, ephemeral: bool) -> Box<dyn TipDatastore> {
    if ephemeral {
        Box::new(MemoryTipStore::new())
    } else {
        Box::new(JsonTipStore::new(data_dir))
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
