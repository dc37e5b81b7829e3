//! Serialization of fitted model parameters.
//!
//! Parameters are converted to plain numerical representations (see
//! [`crate::model::SerializableLogisticParams`]) before being written, so model
//! files do not depend on the backend that produced them.
//!
//! Model files are pretty-printed JSON. Floats are written with enough digits
//! to read back bit-for-bit.

use crate::error::{ModelError, Result};
use std::error::Error;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// A parameter representation that can be serialized to and from bytes.
///
/// Implementors should contain only plain numerical data (`Vec<f64>`, scalars),
/// not backend tensors.
pub trait SerializableParams: Sized {
    type Error: Error + Send + Sync + 'static;

    fn to_bytes(&self) -> std::result::Result<Vec<u8>, Self::Error>;

    fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, Self::Error>;
}

impl<T> SerializableParams for T
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    type Error = serde_json::Error;

    fn to_bytes(&self) -> std::result::Result<Vec<u8>, Self::Error> {
        serde_json::to_vec_pretty(self)
    }

    fn from_bytes(bytes: &[u8]) -> std::result::Result<Self, Self::Error> {
        serde_json::from_slice(bytes)
    }
}

fn io_error(path: &Path, source: io::Error) -> ModelError {
    let path = path.to_path_buf();
    match source.kind() {
        io::ErrorKind::NotFound => ModelError::PersistenceNotFound { path },
        io::ErrorKind::PermissionDenied => ModelError::PersistenceAccessDenied { path },
        _ => ModelError::Io { path, source },
    }
}

/// Serializes `params` and writes them to `path`, replacing any existing file.
pub fn write_params<T: SerializableParams>(path: &Path, params: &T) -> Result<()> {
    let bytes = params
        .to_bytes()
        .map_err(|e| ModelError::PersistenceCorrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    fs::write(path, &bytes).map_err(|e| io_error(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "model file written");
    Ok(())
}

/// Reads and deserializes parameters from `path`.
///
/// # Errors
/// - [`ModelError::PersistenceNotFound`] if the file does not exist
/// - [`ModelError::PersistenceAccessDenied`] if it cannot be read
/// - [`ModelError::PersistenceCorrupt`] if its content does not parse
pub fn read_params<T: SerializableParams>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
    T::from_bytes(&bytes).map_err(|e| ModelError::PersistenceCorrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
