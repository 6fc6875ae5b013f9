//! # Storage Traits
//!
//! This module defines the storage abstraction traits that describe what the
//! domain layer needs from the external store. The hosted document database
//! of the original deployment is represented by these interfaces; the file
//! repositories in `storage::file` are the local implementation.

use anyhow::Result;
use async_trait::async_trait;
use shared::{Favorite, Transaction};

/// Trait defining the interface for transaction storage operations
#[async_trait]
pub trait TransactionStorage: Send + Sync {
    /// Store a new transaction
    async fn store_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Retrieve a specific transaction by ID
    async fn get_transaction(&self, transaction_id: &str) -> Result<Option<Transaction>>;

    /// List all transactions ordered by date descending (most recent first)
    async fn list_transactions(&self) -> Result<Vec<Transaction>>;

    /// Update an existing transaction
    async fn update_transaction(&self, transaction: &Transaction) -> Result<()>;

    /// Delete a transaction by ID.
    /// Returns true if the transaction was found and deleted, false otherwise
    async fn delete_transaction(&self, transaction_id: &str) -> Result<bool>;
}

/// Trait defining the interface for settings storage operations.
///
/// Writes have merge semantics: setting one key never clobbers the other.
#[async_trait]
pub trait SettingsStorage: Send + Sync {
    /// Get the monthly profit goal (0 when never set)
    async fn get_monthly_goal(&self) -> Result<f64>;

    /// Set the monthly profit goal, leaving other settings untouched
    async fn set_monthly_goal(&self, goal: f64) -> Result<()>;

    /// Get the favorite transaction templates
    async fn get_favorites(&self) -> Result<Vec<Favorite>>;

    /// Replace the favorite templates, leaving other settings untouched
    async fn set_favorites(&self, favorites: &[Favorite]) -> Result<()>;
}

/// Trait defining the interface for stored PIN operations, keyed by username
#[async_trait]
pub trait PinStorage: Send + Sync {
    /// Retrieve the stored PIN for a user, if one was ever registered
    async fn get_pin(&self, username: &str) -> Result<Option<String>>;

    /// Persist the PIN for a user
    async fn set_pin(&self, username: &str, pin: &str) -> Result<()>;

    /// Remove the stored PIN for a user
    async fn clear_pin(&self, username: &str) -> Result<()>;
}
