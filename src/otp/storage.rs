//! On-disk persistence of the imported data set.
//!
//! A single fixed-name JSON document in the per-user data directory,
//! read once at startup and fully overwritten on every successful import.

use std::fs;
use std::path::{Path, PathBuf};

use crate::otp::types::*;

/// Fixed filename inside the application data directory.
pub const DATA_FILE: &str = "tokens.json";

const APP_DIR: &str = "authdeck";

/// Platform data file path (`<user data dir>/authdeck/tokens.json`).
/// `None` when the platform exposes no data directory.
pub fn default_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_DIR).join(DATA_FILE))
}

/// Read the persisted raw document if one exists. A missing file is the
/// normal first-run state, not an error.
pub fn read_if_present(path: &Path) -> Result<Option<Vec<u8>>, AuthError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(
            AuthError::new(AuthErrorKind::IoError, "failed to read data file")
                .with_detail(e.to_string()),
        ),
    }
}

/// Overwrite the persisted document with `set`, creating the parent
/// directory on first save. Written compact, matching the import format.
pub fn save(path: &Path, set: &DataSet) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AuthError::new(AuthErrorKind::IoError, "failed to create data directory")
                .with_detail(e.to_string())
        })?;
    }
    let json = serde_json::to_string(set).map_err(|e| {
        AuthError::new(AuthErrorKind::IoError, "failed to serialise data set")
            .with_detail(e.to_string())
    })?;
    fs::write(path, json).map_err(|e| {
        AuthError::new(AuthErrorKind::IoError, "failed to write data file")
            .with_detail(e.to_string())
    })
}
