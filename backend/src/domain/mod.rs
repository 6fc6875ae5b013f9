//! # Domain Module
//!
//! Contains all business logic for the shop books tracker.
//!
//! This module encapsulates the core business rules and services that define
//! how income/expense records are validated, aggregated, and gated. It
//! operates independently of any specific UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **reporting**: Derives every dashboard view model from the transaction
//!   snapshot (month windows, summaries, breakdowns, trend, comparisons)
//! - **transaction_service**: Transaction CRUD with validation-before-write
//!   and the staged delete / undo grace window
//! - **settings_service**: Monthly goal and favorite templates, with
//!   merge-semantics persistence and declarative goal notices
//! - **session_lock**: The PIN lock state machine with idle re-locking
//! - **export_service**: TSV and print-formatted month reports
//! - **categories**: The fixed category/color tables
//!
//! ## Design Principles
//!
//! - **Pure aggregation**: reporting functions are total, synchronous and
//!   side-effect free, re-runnable on every store update
//! - **Storage agnostic**: services talk to repositories behind the storage
//!   traits and never touch files directly
//! - **UI agnostic**: user-visible outcomes (notices, lock status, error
//!   display delays) are returned as values, never performed as effects

pub mod categories;
pub mod export_service;
pub mod reporting;
pub mod session_lock;
pub mod settings_service;
pub mod transaction_service;

pub use export_service::*;
pub use reporting::*;
pub use session_lock::*;
pub use settings_service::*;
pub use transaction_service::*;
