//! Inventory data file codec
//!
//! The data file is a single UTF-8 JSON object mapping item names to integer
//! quantities:
//!
//! ```text
//! {"apple":7,"banana":-2}
//! ```
//!
//! # Format Overview
//!
//! - No schema version, checksum or header
//! - Keys are item names, values are signed 64-bit integers
//! - Object order is the store's iteration order
//! - Files are written in one shot; a crash mid-write can leave a truncated
//!   file, which readers report as [`SnapshotError::InvalidJson`]
//!
//! # Example
//!
//! ```no_run
//! use inventory_store::parser::snapshot;
//!
//! # async fn demo() -> inventory_store::error::Result<()> {
//! let entries = snapshot::read("inventory.json").await?;
//! snapshot::write("backup.json", &entries).await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::store::entries::Entries;

/// Represents errors that can occur while reading or encoding a data file
#[derive(Debug)]
pub enum SnapshotError {
    /// The data file does not exist
    NotFound(PathBuf),
    /// The file exists but is not a JSON object of integer quantities
    InvalidJson(PathBuf, serde_json::Error),
    /// The store could not be encoded as JSON
    Encode(serde_json::Error),
    /// Any other IO failure while reading
    IoError(PathBuf, io::Error),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::NotFound(path) => write!(f, "data file not found: {}", path.display()),
            SnapshotError::InvalidJson(path, e) => {
                write!(f, "invalid JSON in data file {}: {}", path.display(), e)
            }
            SnapshotError::Encode(e) => write!(f, "could not encode inventory: {}", e),
            SnapshotError::IoError(path, e) => write!(f, "could not read {}: {}", path.display(), e),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Decodes a data file body
///
/// # Returns
///
/// * `Ok(Entries)` - Items in the order they appear in the object
/// * `Err(serde_json::Error)` - Malformed JSON, a non-object top level, or a
///   quantity that is not an integer
pub fn decode(bytes: &[u8]) -> std::result::Result<Entries, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Encodes entries as a compact JSON object
pub fn encode(entries: &Entries) -> std::result::Result<Vec<u8>, SnapshotError> {
    serde_json::to_vec(entries).map_err(SnapshotError::Encode)
}

/// Reads and decodes the data file at `path`
///
/// # Returns
///
/// * `Ok(Entries)` - Parsed inventory
/// * `Err(SnapshotError::NotFound)` - No file at `path`
/// * `Err(SnapshotError::InvalidJson)` - File content is not a valid inventory
/// * `Err(SnapshotError::IoError)` - Any other read failure
pub async fn read(path: impl AsRef<Path>) -> std::result::Result<Entries, SnapshotError> {
    let path = path.as_ref();
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(SnapshotError::NotFound(path.to_path_buf()));
        }
        Err(e) => return Err(SnapshotError::IoError(path.to_path_buf(), e)),
    };

    decode(&bytes).map_err(|e| SnapshotError::InvalidJson(path.to_path_buf(), e))
}

/// Encodes `entries` and writes them to `path`, replacing any existing file
///
/// Write failures surface as [`crate::error::InventoryError::Io`].
pub async fn write(path: impl AsRef<Path>, entries: &Entries) -> Result<()> {
    let bytes = encode(entries)?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}
