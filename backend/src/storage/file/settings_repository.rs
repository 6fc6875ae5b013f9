//! YAML-backed settings repository.
//!
//! One `settings.yaml` per user holding the monthly goal and the favorite
//! templates. Each setter rewrites only its own key (read-modify-write of
//! the whole document), so partial updates never clobber unrelated keys.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::Favorite;
use std::fs;
use std::path::PathBuf;

use super::connection::FileConnection;
use crate::storage::traits::SettingsStorage;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredSettings {
    #[serde(default)]
    monthly_goal: f64,
    #[serde(default)]
    favorites: Vec<Favorite>,
}

#[derive(Clone)]
pub struct SettingsRepository {
    connection: FileConnection,
    username: String,
}

impl SettingsRepository {
    pub fn new(connection: FileConnection, username: &str) -> Self {
        Self { connection, username: username.to_string() }
    }

    fn file_path(&self) -> Result<PathBuf> {
        Ok(self.connection.user_directory(&self.username)?.join("settings.yaml"))
    }

    fn read(&self) -> Result<StoredSettings> {
        let path = self.file_path()?;
        if !path.exists() {
            return Ok(StoredSettings::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    fn write(&self, settings: &StoredSettings) -> Result<()> {
        let content = serde_yaml::to_string(settings)?;
        self.connection.write_atomic(&self.file_path()?, &content)
    }
}

#[async_trait]
impl SettingsStorage for SettingsRepository {
    async fn get_monthly_goal(&self) -> Result<f64> {
        Ok(self.read()?.monthly_goal)
    }

    async fn set_monthly_goal(&self, goal: f64) -> Result<()> {
        let mut settings = self.read()?;
        settings.monthly_goal = goal;
        self.write(&settings)
    }

    async fn get_favorites(&self) -> Result<Vec<Favorite>> {
        Ok(self.read()?.favorites)
    }

    async fn set_favorites(&self, favorites: &[Favorite]) -> Result<()> {
        let mut settings = self.read()?;
        settings.favorites = favorites.to_vec();
        self.write(&settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::TransactionType;
    use tempfile::TempDir;

    fn setup() -> (SettingsRepository, TempDir) {
        let dir = TempDir::new().unwrap();
        let connection = FileConnection::new(dir.path()).unwrap();
        (SettingsRepository::new(connection, "somchai"), dir)
    }

    #[tokio::test]
    async fn test_defaults_when_file_missing() {
        let (repo, _dir) = setup();
        assert_eq!(repo.get_monthly_goal().await.unwrap(), 0.0);
        assert!(repo.get_favorites().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_merge_semantics_between_keys() {
        let (repo, _dir) = setup();

        let favorites = vec![Favorite {
            description: "ค่าส่งของ".to_string(),
            amount: 500.0,
            category: "ค่าขนส่ง".to_string(),
            transaction_type: TransactionType::Expense,
        }];
        repo.set_favorites(&favorites).await.unwrap();
        repo.set_monthly_goal(12_000.0).await.unwrap();

        // Neither write clobbered the other key
        assert_eq!(repo.get_monthly_goal().await.unwrap(), 12_000.0);
        assert_eq!(repo.get_favorites().await.unwrap(), favorites);
    }
}
