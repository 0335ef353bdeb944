use std::path::{Path, PathBuf};

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use serde_json::{Map, Value};
use tokio::{fs, sync::Mutex};

use super::KeyValueStore;

/// Single JSON document on disk mapping each key to its value as a JSON
/// string, so every value reads back exactly as it was written.
///
/// A hand-edited file may hold a plain JSON value (object, array, number)
/// under a key; it is read back as its compact JSON text.
/// Writes go to a temporary file first and are renamed into place.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(e).wrap_err_with(|| format!("Failed to read {}", self.path.display()));
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(document)) => Ok(document),
            Ok(_) | Err(_) => {
                tracing::warn!(
                    "Storage file {} is not a JSON object; treating it as empty",
                    self.path.display()
                );
                Ok(Map::new())
            }
        }
    }

    async fn write_document(&self, document: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .wrap_err_with(|| format!("Failed to create {}", parent.display()))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let bytes = serde_json::to_vec_pretty(document)?;
        fs::write(&tmp, bytes)
            .await
            .wrap_err_with(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .await
            .wrap_err_with(|| format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let document = self.read_document().await?;
        Ok(document.get(key).map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_document().await?;
        document.insert(key.to_string(), Value::String(value.to_string()));

        tracing::debug!("Writing key {} to {}", key, self.path.display());
        self.write_document(&document).await
    }
}
