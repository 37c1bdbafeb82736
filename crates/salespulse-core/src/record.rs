//! Persisted record types.
//!
//! Field names serialize in the camelCase / PascalCase forms the persisted
//! JSON has always used, so a store opened over data written by an earlier
//! deployment reads it back unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form target record as produced by the spreadsheet parser.
///
/// Quantity targets carry `RepName`, `RetailName`, `Month`, `Year`, `Model`,
/// `Target`, `Achievement`; value targets carry `RepName`, `Month`, `Year`,
/// `ValueTarget`, `ValueAchievement`. Upload payloads are trusted verbatim:
/// no schema is enforced, and extra keys pass through untouched.
pub type TargetRecord = serde_json::Map<String, serde_json::Value>;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Oversees reps; reviews performance.
    Manager,
    /// Field sales representative.
    Rep,
}

impl Role {
    /// The view a freshly logged-in user of this role lands on.
    pub fn landing_view(&self) -> View {
        match self {
            Role::Admin => View::Admin,
            Role::Manager => View::Manager,
            Role::Rep => View::Rep,
        }
    }
}

/// Current UI view. Session state only, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Admin,
    Manager,
    Rep,
}

/// A user account.
///
/// Passwords are stored and compared in plain text, matching the system this
/// store replaces. See DESIGN.md for the explicit call-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Immutable, unique once assigned.
    pub id: i64,
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: Role,
    /// Retail outlet the rep serves. Reps only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retail_name: Option<String>,
    pub avatar: String,
}

/// Stock on hand for one (rep, model) pair.
///
/// Unique per `(rep_id, model)`; the store updates in place on conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub id: i64,
    /// Owning user (the rep who reported the count).
    pub rep_id: i64,
    pub model: String,
    pub quantity: f64,
    pub last_updated: DateTime<Utc>,
}

/// One activity log entry. The log is prepend-only, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}
