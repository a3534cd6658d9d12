//! Persisted client configuration: one server address in a RON file.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use client_logging::client_warn;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Address used until the user stores another one.
pub(crate) const DEFAULT_SERVER_ADDR: &str = "http://localhost:8100";

const CONFIG_FILENAME: &str = "config.ron";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("config directory missing or not writable: {0}")]
    ConfigDir(String),
    #[error("serialize error: {0}")]
    Serialize(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedConfig {
    addr: String,
}

/// Per-user config directory when the caller does not name one.
pub(crate) fn default_config_dir() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("primi")
}

pub(crate) fn config_file(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILENAME)
}

/// Loads the stored server address.
///
/// Never fails: a missing file means the default, and an unreadable or
/// unparsable one is logged and also falls back to the default. A stored
/// value is returned verbatim, empty string included.
pub(crate) fn load_server_addr(dir: &Path) -> String {
    let path = config_file(dir);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return DEFAULT_SERVER_ADDR.to_string();
        }
        Err(err) => {
            client_warn!("Failed to read config from {:?}: {}", path, err);
            return DEFAULT_SERVER_ADDR.to_string();
        }
    };

    let config: PersistedConfig = match ron::from_str(&content) {
        Ok(config) => config,
        Err(err) => {
            client_warn!("Failed to parse config from {:?}: {}", path, err);
            return DEFAULT_SERVER_ADDR.to_string();
        }
    };

    config.addr
}

/// Stores the server address, trimmed, replacing the config file atomically.
/// Returns the file's path.
pub(crate) fn save_server_addr(dir: &Path, addr: &str) -> Result<PathBuf, PersistError> {
    let config = PersistedConfig {
        addr: addr.trim().to_string(),
    };
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(&config, pretty)
        .map_err(|err| PersistError::Serialize(err.to_string()))?;

    let writer = AtomicFileWriter::new(dir.to_path_buf());
    writer.write(CONFIG_FILENAME, &content)
}

/// Makes sure a config file exists so there is something to open, writing
/// the default address when it is missing. Returns the file's path.
pub(crate) fn ensure_config_file(dir: &Path) -> Result<PathBuf, PersistError> {
    let path = config_file(dir);
    if path.exists() {
        return Ok(path);
    }
    save_server_addr(dir, DEFAULT_SERVER_ADDR)
}

fn ensure_config_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::ConfigDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::ConfigDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::ConfigDir(e.to_string()))?;
    }
    // Basic writability probe: try creating a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::ConfigDir(e.to_string()))?;
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn write(&self, filename: &str, content: &str) -> Result<PathBuf, PersistError> {
        ensure_config_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace existing file if present to keep determinism.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_means_the_default_address() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_server_addr(temp.path()), DEFAULT_SERVER_ADDR);
    }

    #[test]
    fn stored_address_round_trips() {
        let temp = TempDir::new().unwrap();
        save_server_addr(temp.path(), "http://10.0.0.5:8100").unwrap();
        assert_eq!(load_server_addr(temp.path()), "http://10.0.0.5:8100");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_on_save() {
        let temp = TempDir::new().unwrap();
        save_server_addr(temp.path(), "  http://10.0.0.5:8100\n").unwrap();
        assert_eq!(load_server_addr(temp.path()), "http://10.0.0.5:8100");
    }

    #[test]
    fn whitespace_only_saves_as_empty_not_default() {
        let temp = TempDir::new().unwrap();
        save_server_addr(temp.path(), "   ").unwrap();
        // An empty stored value is a stored value; the default only stands
        // in for an absent one.
        assert_eq!(load_server_addr(temp.path()), "");
    }

    #[test]
    fn a_second_save_replaces_the_first() {
        let temp = TempDir::new().unwrap();
        save_server_addr(temp.path(), "http://one:8100").unwrap();
        save_server_addr(temp.path(), "http://two:8100").unwrap();
        assert_eq!(load_server_addr(temp.path()), "http://two:8100");
    }

    #[test]
    fn unparsable_config_falls_back_to_the_default() {
        let temp = TempDir::new().unwrap();
        fs::write(config_file(temp.path()), "not ron at all").unwrap();
        assert_eq!(load_server_addr(temp.path()), DEFAULT_SERVER_ADDR);
    }

    #[test]
    fn ensure_creates_the_file_with_the_default() {
        let temp = TempDir::new().unwrap();
        let path = ensure_config_file(temp.path()).unwrap();
        assert!(path.exists());
        assert_eq!(load_server_addr(temp.path()), DEFAULT_SERVER_ADDR);
    }

    #[test]
    fn ensure_leaves_an_existing_file_alone() {
        let temp = TempDir::new().unwrap();
        save_server_addr(temp.path(), "http://kept:8100").unwrap();
        ensure_config_file(temp.path()).unwrap();
        assert_eq!(load_server_addr(temp.path()), "http://kept:8100");
    }

    #[test]
    fn save_creates_the_config_dir_on_demand() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("primi");
        assert!(!nested.exists());
        save_server_addr(&nested, "http://fresh:8100").unwrap();
        assert_eq!(load_server_addr(&nested), "http://fresh:8100");
    }
}
