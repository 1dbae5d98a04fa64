// persistence.rs

use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::PersistenceError;
use crate::record::CalculationRecord;

/// Where the active history is saved to and loaded from. Redo state is
/// never handed to a store.
pub trait HistoryStore {
    fn save(&self, records: &[CalculationRecord]) -> Result<(), PersistenceError>;
    fn load(&self) -> Result<Vec<CalculationRecord>, PersistenceError>;
    /// Human-readable location for user messages.
    fn location(&self) -> String;
}

/// JSON array of records in a single file, replaced atomically on save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_err(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn write_tmp(&self, tmp: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(tmp)?;
        file.write_all(bytes)?;
        file.write_all(b"\n")?;
        file.sync_all()
    }
}

impl HistoryStore for JsonFileStore {
    fn save(&self, records: &[CalculationRecord]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let bytes = serde_json::to_vec_pretty(records).map_err(|source| PersistenceError::Format {
            path: self.path.clone(),
            source,
        })?;
        let tmp = self.tmp_path();
        let committed = self.write_tmp(&tmp, &bytes).and_then(|_| fs::rename(&tmp, &self.path));
        if let Err(e) = committed {
            let _ = fs::remove_file(&tmp);
            return Err(self.io_err(e));
        }
        info!(path = %self.path.display(), records = records.len(), "history saved");
        Ok(())
    }

    fn load(&self) -> Result<Vec<CalculationRecord>, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no history file, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_err(e)),
        };
        let records: Vec<CalculationRecord> =
            serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Format {
                path: self.path.clone(),
                source,
            })?;
        check_records(&self.path, &records)?;
        info!(path = %self.path.display(), records = records.len(), "history loaded");
        Ok(records)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Whole-file validation: one bad entry rejects the load.
fn check_records(path: &Path, records: &[CalculationRecord]) -> Result<(), PersistenceError> {
    for (i, record) in records.iter().enumerate() {
        if record.operation().trim().is_empty() {
            return Err(PersistenceError::malformed(path, format!("entry {} has an empty operation", i + 1)));
        }
        if i > 0 && record.timestamp() < records[i - 1].timestamp() {
            return Err(PersistenceError::malformed(
                path,
                format!("entry {} is older than the entry before it", i + 1),
            ));
        }
    }
    Ok(())
}

/// Store kept in memory; used when no history file is wanted and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: RefCell<Option<Vec<CalculationRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<CalculationRecord>) -> Self {
        Self {
            saved: RefCell::new(Some(records)),
        }
    }

    pub fn saved(&self) -> Option<Vec<CalculationRecord>> {
        self.saved.borrow().clone()
    }
}

impl HistoryStore for MemoryStore {
    fn save(&self, records: &[CalculationRecord]) -> Result<(), PersistenceError> {
        *self.saved.borrow_mut() = Some(records.to_vec());
        Ok(())
    }

    fn load(&self) -> Result<Vec<CalculationRecord>, PersistenceError> {
        let records = self.saved.borrow().clone().unwrap_or_default();
        check_records(Path::new("<memory>"), &records)?;
        Ok(records)
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
