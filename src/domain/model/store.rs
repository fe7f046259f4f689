//! Model persistence: one self-describing JSON record per model, the
//! only artifact that crosses process boundaries.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::domain::errors::ModelError;
use crate::domain::model::Model;

/// Serializes a model to its JSON record.
pub fn to_json(model: &Model) -> Result<String, ModelError> {
    Ok(serde_json::to_string(model)?)
}

/// Parses a JSON record, dispatching on the `type` tag.
///
/// An unknown or missing tag is a hard error; there is no
/// partial-recovery mode for malformed records.
pub fn from_json(json: &str) -> Result<Model, ModelError> {
    Ok(serde_json::from_str(json)?)
}

/// Writes the model record to `path`, creating parent directories.
pub fn save(model: &Model, path: &Path) -> Result<(), ModelError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;
    }
    let json = to_json(model)?;
    fs::write(path, json).map_err(|source| ModelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    info!("Saved {} model to {}", model.kind().as_str(), path.display());
    Ok(())
}

/// Reads and parses a model record from `path`.
pub fn load(path: &Path) -> Result<Model, ModelError> {
    let json = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let model = from_json(&json)?;
    info!(
        "Loaded {} model from {}",
        model.kind().as_str(),
        path.display()
    );
    Ok(model)
}
