//! YAML-backed PIN repository.
//!
//! One `pin.yaml` per user holding the stored PIN value. The value is kept
//! in plaintext on device, matching the original design's on-device gate.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::connection::FileConnection;
use crate::storage::traits::PinStorage;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredPin {
    pin: String,
}

#[derive(Clone)]
pub struct PinRepository {
    connection: FileConnection,
}

impl PinRepository {
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }

    fn file_path(&self, username: &str) -> Result<PathBuf> {
        Ok(self.connection.user_directory(username)?.join("pin.yaml"))
    }
}

#[async_trait]
impl PinStorage for PinRepository {
    async fn get_pin(&self, username: &str) -> Result<Option<String>> {
        let path = self.file_path(username)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let stored: StoredPin = serde_yaml::from_str(&content)?;
        Ok(Some(stored.pin))
    }

    async fn set_pin(&self, username: &str, pin: &str) -> Result<()> {
        let content = serde_yaml::to_string(&StoredPin { pin: pin.to_string() })?;
        self.connection.write_atomic(&self.file_path(username)?, &content)
    }

    async fn clear_pin(&self, username: &str) -> Result<()> {
        let path = self.file_path(username)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
