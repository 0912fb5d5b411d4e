//! Prospect repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Serialize the full roster to one well-known file and read it back.
//! - Emit `event=prospects_save` / `event=prospects_load` diagnostics.
//!
//! # Invariants
//! - Writes go to a sibling temp file that is synced and then renamed
//!   over the target.
//! - Round-trip through `save` then `load` is lossless and keeps order.

use crate::config::StoreConfig;
use crate::model::prospect::Prospect;
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

const TEMP_FILE_SUFFIX: &str = "tmp";

pub type PersistResult<T> = Result<T, PersistenceError>;

/// Storage-layer error for roster persistence.
#[derive(Debug)]
pub enum PersistenceError {
    /// File is missing or cannot be read.
    Unreadable { path: PathBuf, source: io::Error },
    /// File was read but does not hold a valid roster.
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Roster could not be serialized.
    Encode(serde_json::Error),
    /// Temp file write, sync or rename failed.
    Write { path: PathBuf, source: io::Error },
}

impl PersistenceError {
    /// Whether this error only means "nothing saved yet".
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Unreadable { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    /// Stable short code used in diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unreadable { .. } if self.is_missing() => "not_found",
            Self::Unreadable { .. } => "unreadable",
            Self::Corrupt { .. } => "corrupt",
            Self::Encode(_) => "encode_failed",
            Self::Write { .. } => "write_failed",
        }
    }
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable { path, source } => {
                write!(f, "cannot read `{}`: {source}", path.display())
            }
            Self::Corrupt { path, source } => {
                write!(f, "corrupt prospect data in `{}`: {source}", path.display())
            }
            Self::Encode(err) => write!(f, "cannot encode prospects: {err}"),
            Self::Write { path, source } => {
                write!(f, "cannot write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unreadable { source, .. } | Self::Write { source, .. } => Some(source),
            Self::Corrupt { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
        }
    }
}

/// Durable storage contract for the full prospect collection.
pub trait ProspectRepository {
    /// Reads the whole collection in persisted order.
    fn load(&self) -> PersistResult<Vec<Prospect>>;
    /// Replaces the whole persisted collection.
    fn save(&self, prospects: &[Prospect]) -> PersistResult<()>;
}

/// Repository storing the roster as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileProspectRepository {
    path: PathBuf,
}

impl JsonFileProspectRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses the well-known save file under the configured data directory.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.save_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|value| value.to_os_string())
            .unwrap_or_default();
        name.push(".");
        name.push(TEMP_FILE_SUFFIX);
        self.path.with_file_name(name)
    }

    fn write_atomically(&self, bytes: &[u8]) -> PersistResult<()> {
        let write_err = |source: io::Error| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let temp_path = self.temp_path();
        let written = File::create(&temp_path).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });
        if let Err(err) = written.and_then(|()| fs::rename(&temp_path, &self.path)) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(err));
        }
        Ok(())
    }
}

impl ProspectRepository for JsonFileProspectRepository {
    fn load(&self) -> PersistResult<Vec<Prospect>> {
        let started_at = Instant::now();
        debug!("event=prospects_load module=repo status=start");

        let bytes = fs::read(&self.path).map_err(|source| PersistenceError::Unreadable {
            path: self.path.clone(),
            source,
        })?;
        let prospects: Vec<Prospect> =
            serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        info!(
            "event=prospects_load module=repo status=ok count={} duration_ms={}",
            prospects.len(),
            started_at.elapsed().as_millis()
        );
        Ok(prospects)
    }

    fn save(&self, prospects: &[Prospect]) -> PersistResult<()> {
        let started_at = Instant::now();
        debug!(
            "event=prospects_save module=repo status=start count={}",
            prospects.len()
        );

        let result = serde_json::to_vec_pretty(prospects)
            .map_err(PersistenceError::Encode)
            .and_then(|bytes| self.write_atomically(&bytes));

        match &result {
            Ok(()) => info!(
                "event=prospects_save module=repo status=ok count={} duration_ms={}",
                prospects.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=prospects_save module=repo status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonFileProspectRepository, ProspectRepository};
    use crate::model::prospect::Prospect;

    #[test]
    fn temp_file_is_a_sibling_of_the_target() {
        let repo = JsonFileProspectRepository::new("/data/hotprospects/SavedData.json");
        assert_eq!(
            repo.temp_path().to_str(),
            Some("/data/hotprospects/SavedData.json.tmp")
        );
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileProspectRepository::new(dir.path().join("SavedData.json"));

        repo.save(&[Prospect::new().with_name("Amy")]).unwrap();

        assert!(repo.path().exists());
        assert!(!repo.temp_path().exists());
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileProspectRepository::new(dir.path().join("absent.json"));

        let err = repo.load().unwrap_err();
        assert!(err.is_missing());
        assert_eq!(err.code(), "not_found");
    }
}
