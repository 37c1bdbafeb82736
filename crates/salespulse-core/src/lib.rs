//! # salespulse-core
//!
//! Shared record types and configuration for the SalesPulse session store.
//!
//! This crate defines:
//! - The persisted record shapes (users, stocks, activity log entries) with
//!   serde renames matching the JSON produced by earlier deployments, so
//!   previously persisted data round-trips unchanged
//! - The free-form target record type used for bulk spreadsheet uploads
//! - Configuration types loadable from YAML (storage backend, avatar service)

pub mod config;
pub mod record;

pub use config::{AvatarConfig, ConfigError, StorageBackend, StorageConfig, StoreConfig};
pub use record::{ActivityEntry, Role, Stock, TargetRecord, User, View};
