//! File-based storage backend: CSV for the transaction collection, YAML for
//! settings and the stored PIN, all under a per-user data directory.

pub mod connection;
pub mod pin_repository;
pub mod settings_repository;
pub mod transaction_repository;

pub use connection::FileConnection;
pub use pin_repository::PinRepository;
pub use settings_repository::SettingsRepository;
pub use transaction_repository::TransactionRepository;
