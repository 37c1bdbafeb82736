//! Error types for the store crate.
//!
//! Nothing here is fatal: authentication failure is the `Ok(false)` arm of
//! [`SessionStore::login`](crate::session::SessionStore::login), absent ids on
//! update/delete are silent no-ops, and malformed numerics in value targets
//! coerce to 0. The variants below cover storage faults and the guarded
//! password-change paths.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error from the file backend.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A storage lock was poisoned by a panicking holder.
    #[error("storage lock poisoned")]
    LockPoisoned,

    /// The operation needs a logged-in user and there is none.
    #[error("no user is logged in")]
    NotLoggedIn,

    /// Password change rejected: the old password does not match.
    #[error("Current password is incorrect")]
    IncorrectPassword,

    /// Password change rejected: the current user is missing from the user
    /// collection.
    #[error("User not found")]
    UserNotFound,
}
