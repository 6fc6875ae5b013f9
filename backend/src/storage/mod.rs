//! # Storage Module
//!
//! Data persistence for the shop books tracker. The domain layer only sees
//! the traits in [`traits`]; the [`file`] backend implements them with CSV
//! and YAML files in a per-user data directory.

pub mod file;
pub mod traits;

pub use file::*;
pub use traits::*;
