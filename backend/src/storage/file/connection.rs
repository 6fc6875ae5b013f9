//! FileConnection manages the data directory and per-user file layout.
//!
//! ## File Structure
//!
//! ```text
//! data/
//! └── {username}/
//!     ├── transactions.csv
//!     ├── settings.yaml
//!     └── pin.yaml
//! ```

use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage connection shared by the repositories
#[derive(Clone)]
pub struct FileConnection {
    base_directory: PathBuf,
}

impl FileConnection {
    /// Create a new connection rooted at a base directory, creating it if
    /// it does not exist yet
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }
        Ok(Self { base_directory: base_path })
    }

    /// Create a connection in the default data directory,
    /// `~/Documents/Shop Books`
    pub fn new_default() -> Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        let data_dir = home_dir.join("Documents").join("Shop Books");
        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Directory holding one user's data files, created on demand
    pub fn user_directory(&self, username: &str) -> Result<PathBuf> {
        let dir = self.base_directory.join(username);
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            info!("Created user data directory: {}", dir.display());
        }
        Ok(dir)
    }

    /// Atomic file write: write to a temp file, then rename into place
    pub fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_user_directory_created_on_demand() {
        let dir = TempDir::new().unwrap();
        let connection = FileConnection::new(dir.path()).unwrap();

        let user_dir = connection.user_directory("somchai").unwrap();
        assert!(user_dir.exists());
        assert!(user_dir.ends_with("somchai"));
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let connection = FileConnection::new(dir.path()).unwrap();
        let path = dir.path().join("settings.yaml");

        connection.write_atomic(&path, "monthly_goal: 1.0\n").unwrap();
        connection.write_atomic(&path, "monthly_goal: 2.0\n").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "monthly_goal: 2.0\n");
        assert!(!path.with_extension("tmp").exists());
    }
}
