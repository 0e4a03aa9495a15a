//! File helpers shared by every YAML-per-entity store

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::warn;
use ulid::Ulid;

use crate::error::Result;

/// `None` for ids that cannot name a file in the store
pub fn entity_path(dir: PathBuf, id: &str) -> Option<PathBuf> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then(|| dir.join(format!("{id}.yaml")))
}

/// Read one entity file. `Ok(None)` when the id is invalid or no file exists.
pub async fn read_yaml<T: serde::de::DeserializeOwned>(
    dir: PathBuf,
    id: &str,
) -> Result<Option<T>> {
    let Some(path) = entity_path(dir, id) else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path).await?;
    Ok(Some(serde_yaml_ng::from_str(&content)?))
}

/// Read every `.yaml` file in `dir`. Unparseable files are skipped with a
/// warning.
pub async fn read_all_yaml<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    if !dir.exists() {
        return Ok(items);
    }
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
            continue;
        }
        let content = fs::read_to_string(&path).await?;
        match serde_yaml_ng::from_str::<T>(&content) {
            Ok(item) => items.push(item),
            Err(e) => warn!(?path, %e, "skipping invalid definition"),
        }
    }
    Ok(items)
}

/// Remove an entity file if the id is valid and the file exists.
pub async fn remove_yaml(dir: PathBuf, id: &str) -> Result<()> {
    if let Some(path) = entity_path(dir, id) {
        if path.exists() {
            fs::remove_file(&path).await?;
        }
    }
    Ok(())
}

/// Write to a temp file then rename for atomic persistence.
pub async fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no parent dir"))?;
    fs::create_dir_all(dir).await?;
    let tmp = dir.join(format!(".tmp_{}", Ulid::new()));
    fs::write(&tmp, data).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}
