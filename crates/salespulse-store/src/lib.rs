//! # salespulse-store
//!
//! Write-through session store for the SalesPulse sales-force tool.
//!
//! This crate provides functionality for:
//! - Authenticating users and routing them to a role-appropriate view
//! - Managing user accounts, per-rep stock levels and an append-only
//!   activity log
//! - Ingesting bulk target uploads (overwrite, append, and master uploads)
//! - Joining quantity and value targets per rep/month/year for performance
//!   review
//! - Persisting every mutation synchronously to a string-keyed key-value
//!   substrate (in-memory or one-file-per-key)
//!
//! ## Operations
//!
//! | Operation | Description |
//! |-----------|-------------|
//! | `login` / `logout` | Plaintext credential check, view routing, "Login" log entry |
//! | `change_password` | Guarded password update, "Changed Password" log entry |
//! | `add_user` / `update_user` / `delete_user` | Account management |
//! | `update_avatar` | Avatar change mirrored into the user collection |
//! | `process_target_upload` | Destructive overwrite of quantity targets |
//! | `append_target_upload` | Incremental historical load |
//! | `process_master_upload` | Full replace of both target collections + sync stamp |
//! | `update_stock` | Upsert on (rep, model) |
//! | `rep_performance` | Read-only join of targets by rep name/month/year |
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use salespulse_core::StoreConfig;
//! use salespulse_store::SessionStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoreConfig::default();
//! let mut store = SessionStore::new(&config)?;
//!
//! if store.login("rep", "123")? {
//!     store.update_stock("X100", 12.0)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod performance;
pub mod session;
pub mod storage;

pub use error::StoreError;
pub use performance::{RepPerformance, ValueAttainment};
pub use session::{NewUser, SessionStore};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, create_storage, keys};
