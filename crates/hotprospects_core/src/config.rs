//! Storage location configuration.
//!
//! # Responsibility
//! - Resolve the per-user, per-installation data directory.
//! - Name the well-known save file and log directory inside it.
//!
//! # Invariants
//! - The save file path is stable across restarts for the same user.
//! - An explicit `HOTPROSPECTS_DATA_DIR` always wins over platform defaults.
//! - The data directory is absolute, so derived log paths are too.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "HOTPROSPECTS_DATA_DIR";
/// Well-known roster file name inside the data directory.
pub const SAVE_FILE_NAME: &str = "SavedData.json";

const APP_DIR_NAME: &str = "hotprospects";
const LOG_DIR_NAME: &str = "logs";

/// Configuration resolution errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither the override variable nor a platform data directory exists.
    NoDataDirectory,
    /// Directory could not be made absolute.
    UnresolvableDataDirectory { dir: PathBuf, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDataDirectory => write!(
                f,
                "no data directory available; set {DATA_DIR_ENV} to an absolute path"
            ),
            Self::UnresolvableDataDirectory { dir, reason } => write!(
                f,
                "cannot resolve data directory `{}`: {reason}",
                dir.display()
            ),
        }
    }
}

impl Error for ConfigError {}

/// Where the roster and its logs live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    data_dir: PathBuf,
}

impl StoreConfig {
    /// Uses `data_dir`, resolving a relative path against the working directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let data_dir = data_dir.into();
        let data_dir = std::path::absolute(&data_dir).map_err(|err| {
            ConfigError::UnresolvableDataDirectory {
                dir: data_dir.clone(),
                reason: err.to_string(),
            }
        })?;
        Ok(Self { data_dir })
    }

    /// Resolves the data directory from the environment, then platform defaults.
    pub fn resolve() -> Result<Self, ConfigError> {
        let override_dir = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        Self::resolve_with(override_dir, dirs::data_dir())
    }

    fn resolve_with(
        override_dir: Option<PathBuf>,
        platform_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = override_dir.filter(|dir| !dir.as_os_str().is_empty()) {
            return Self::new(dir);
        }
        let platform_dir = platform_dir.ok_or(ConfigError::NoDataDirectory)?;
        Self::new(platform_dir.join(APP_DIR_NAME))
    }

    pub fn save_file(&self) -> PathBuf {
        self.data_dir.join(SAVE_FILE_NAME)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreConfig, SAVE_FILE_NAME};
    use std::path::PathBuf;

    #[test]
    fn override_wins_over_platform_dir() {
        let config = StoreConfig::resolve_with(
            Some(PathBuf::from("/tmp/prospects")),
            Some(PathBuf::from("/home/u/.local/share")),
        )
        .unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/prospects"));
        assert_eq!(
            config.save_file(),
            PathBuf::from("/tmp/prospects").join(SAVE_FILE_NAME)
        );
    }

    #[test]
    fn empty_override_falls_back_to_platform_dir() {
        let config = StoreConfig::resolve_with(
            Some(PathBuf::new()),
            Some(PathBuf::from("/home/u/.local/share")),
        )
        .unwrap();
        assert_eq!(
            config.data_dir(),
            PathBuf::from("/home/u/.local/share/hotprospects")
        );
        assert_eq!(
            config.log_dir(),
            PathBuf::from("/home/u/.local/share/hotprospects/logs")
        );
    }

    #[test]
    fn relative_override_is_made_absolute() {
        let config =
            StoreConfig::resolve_with(Some(PathBuf::from("rel")), None).unwrap();

        assert!(config.data_dir().is_absolute());
        assert!(config.data_dir().ends_with("rel"));
        assert!(config.log_dir().is_absolute());
        assert_eq!(
            config.data_dir(),
            std::env::current_dir().unwrap().join("rel")
        );
    }

    #[test]
    fn relative_dir_passed_directly_is_made_absolute() {
        let config = StoreConfig::new("nested/data").unwrap();
        assert!(config.save_file().is_absolute());
        assert!(config.save_file().ends_with("nested/data/SavedData.json"));
    }

    #[test]
    fn empty_dir_cannot_be_resolved() {
        assert!(matches!(
            StoreConfig::new(""),
            Err(ConfigError::UnresolvableDataDirectory { .. })
        ));
    }

    #[test]
    fn missing_everything_is_an_error() {
        assert_eq!(
            StoreConfig::resolve_with(None, None).unwrap_err(),
            ConfigError::NoDataDirectory
        );
    }
}
