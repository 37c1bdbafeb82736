//! The session store.
//!
//! An in-memory mirror of five record collections (users, quantity targets,
//! value targets, stocks, activity log) plus session state, backed by a
//! [`KeyValueStorage`] substrate. Every mutating operation serializes the
//! collections it touched and writes them through synchronously before
//! returning; there is no batching or deferred flush.
//!
//! The store is an explicit value owned by the application root, not a
//! process-wide singleton; construct one per test for isolation.

use crate::error::StoreError;
use crate::performance::{
    self, RepPerformance, VALUE_ACHIEVEMENT, VALUE_TARGET, ValueAttainment,
};
use crate::storage::{KeyValueStorage, create_storage, keys};
use chrono::{SecondsFormat, Utc};
use salespulse_core::config::AvatarConfig;
use salespulse_core::{ActivityEntry, Role, Stock, StoreConfig, TargetRecord, User, View};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Which persisted collection a write-through targets.
#[derive(Debug, Clone, Copy)]
enum Collection {
    Users,
    Targets,
    ValueTargets,
    Stocks,
    Logs,
}

/// Input for [`SessionStore::add_user`]. The store assigns the id and
/// synthesizes the avatar.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: Role,
    pub retail_name: Option<String>,
}

/// The SalesPulse session store.
pub struct SessionStore {
    users: Vec<User>,
    targets: Vec<TargetRecord>,
    value_targets: Vec<TargetRecord>,
    stocks: Vec<Stock>,
    logs: Vec<ActivityEntry>,
    current_user: Option<User>,
    current_view: View,
    last_sync_date: Option<String>,
    avatar: AvatarConfig,
    storage: Box<dyn KeyValueStorage>,
    /// Last issued time-derived id, for monotonicity within this instance.
    last_id: i64,
}

impl SessionStore {
    /// Open a store using the configured storage backend.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let storage = create_storage(&config.storage)?;
        Self::with_storage(storage, config.avatar.clone())
    }

    /// Open a store over an explicit storage backend.
    ///
    /// Loads each collection by its fixed key. When the user collection is
    /// absent the three default accounts (one per role) are seeded and
    /// persisted immediately; other collections default to empty.
    pub fn with_storage(
        storage: Box<dyn KeyValueStorage>,
        avatar: AvatarConfig,
    ) -> Result<Self, StoreError> {
        let users = load_collection::<User>(storage.as_ref(), keys::USERS)?;
        let targets =
            load_collection::<TargetRecord>(storage.as_ref(), keys::TARGETS)?.unwrap_or_default();
        let value_targets = load_collection::<TargetRecord>(storage.as_ref(), keys::VALUE_TARGETS)?
            .unwrap_or_default();
        let stocks =
            load_collection::<Stock>(storage.as_ref(), keys::STOCKS)?.unwrap_or_default();
        let logs =
            load_collection::<ActivityEntry>(storage.as_ref(), keys::LOGS)?.unwrap_or_default();
        let last_sync_date = storage
            .read(keys::LAST_SYNC_DATE)?
            .filter(|s| !s.is_empty());

        let seed_needed = users.is_none();
        let mut store = Self {
            users: users.unwrap_or_default(),
            targets,
            value_targets,
            stocks,
            logs,
            current_user: None,
            current_view: View::Login,
            last_sync_date,
            avatar,
            storage,
            last_id: 0,
        };

        if seed_needed {
            store.users = default_accounts();
            store.save(Collection::Users)?;
            tracing::info!("Seeded {} default accounts", store.users.len());
        }

        tracing::info!(
            "Loaded {} users, {} targets, {} value targets, {} stocks, {} log entries",
            store.users.len(),
            store.targets.len(),
            store.value_targets.len(),
            store.stocks.len(),
            store.logs.len()
        );

        Ok(store)
    }

    // =========================================================================
    // AUTHENTICATION
    // =========================================================================

    /// Attempt a login. Plaintext comparison on username and password.
    ///
    /// On success sets the current user, records a "Login" activity entry and
    /// routes the view by role. On failure returns `Ok(false)` with no state
    /// change and no log entry.
    pub fn login(&mut self, username: &str, password: &str) -> Result<bool, StoreError> {
        let Some(user) = self
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
        else {
            return Ok(false);
        };

        let user_id = user.id;
        self.current_view = user.role.landing_view();
        self.current_user = Some(user);
        self.log_activity(user_id, "Login")?;
        Ok(true)
    }

    /// Clear the current user and return to the login view. Unconditional.
    pub fn logout(&mut self) {
        self.current_user = None;
        self.current_view = View::Login;
    }

    /// Change the current user's password.
    ///
    /// Fails with [`StoreError::IncorrectPassword`] when `old_password` does
    /// not match, and with [`StoreError::UserNotFound`] when the current user
    /// is no longer present in the user collection.
    pub fn change_password(
        &mut self,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), StoreError> {
        let current = self.current_user.as_ref().ok_or(StoreError::NotLoggedIn)?;
        if current.password != old_password {
            return Err(StoreError::IncorrectPassword);
        }
        let user_id = current.id;

        let Some(index) = self.users.iter().position(|u| u.id == user_id) else {
            tracing::warn!("Current user {} missing from user collection", user_id);
            return Err(StoreError::UserNotFound);
        };

        self.users[index].password = new_password.to_string();
        if let Some(current) = self.current_user.as_mut() {
            current.password = new_password.to_string();
        }
        self.save(Collection::Users)?;
        self.log_activity(user_id, "Changed Password")
    }

    // =========================================================================
    // USER MANAGEMENT
    // =========================================================================

    /// Add a user, assigning a fresh id and a synthesized avatar URL.
    ///
    /// Returns the assigned id. Usernames are not checked for uniqueness.
    pub fn add_user(&mut self, new_user: NewUser) -> Result<i64, StoreError> {
        let id = self.next_id();
        let avatar = self.avatar.url_for(&new_user.name);
        self.users.push(User {
            id,
            name: new_user.name,
            username: new_user.username,
            password: new_user.password,
            role: new_user.role,
            retail_name: new_user.retail_name,
            avatar,
        });
        self.save(Collection::Users)?;
        Ok(id)
    }

    /// Remove a user by id. No-op when absent.
    pub fn delete_user(&mut self, id: i64) -> Result<(), StoreError> {
        self.users.retain(|u| u.id != id);
        self.save(Collection::Users)
    }

    /// Replace the user with the matching id. No-op when absent.
    pub fn update_user(&mut self, updated: User) -> Result<(), StoreError> {
        if let Some(index) = self.users.iter().position(|u| u.id == updated.id) {
            self.users[index] = updated;
            self.save(Collection::Users)?;
        }
        Ok(())
    }

    /// Set the current user's avatar and mirror it into the user collection.
    pub fn update_avatar(&mut self, avatar_url: &str) -> Result<(), StoreError> {
        let current = self.current_user.as_mut().ok_or(StoreError::NotLoggedIn)?;
        current.avatar = avatar_url.to_string();
        let user_id = current.id;

        if let Some(index) = self.users.iter().position(|u| u.id == user_id) {
            self.users[index].avatar = avatar_url.to_string();
            self.save(Collection::Users)?;
        }
        Ok(())
    }

    // =========================================================================
    // TARGET INGESTION
    // =========================================================================

    /// Replace the quantity-target collection wholesale.
    pub fn process_target_upload(
        &mut self,
        records: Vec<TargetRecord>,
    ) -> Result<(), StoreError> {
        tracing::info!("Target upload: replacing with {} records", records.len());
        self.targets = records;
        self.save(Collection::Targets)
    }

    /// Append records to the quantity-target collection, preserving existing
    /// order. Used for incremental historical loads.
    pub fn append_target_upload(&mut self, records: Vec<TargetRecord>) -> Result<(), StoreError> {
        tracing::info!("Target upload: appending {} records", records.len());
        self.targets.extend(records);
        self.save(Collection::Targets)
    }

    /// Master upload: replace both target collections and stamp the sync
    /// timestamp. This is the only operation that touches the sync timestamp.
    pub fn process_master_upload(
        &mut self,
        quantity_records: Vec<TargetRecord>,
        value_records: Vec<TargetRecord>,
    ) -> Result<(), StoreError> {
        tracing::info!(
            "Master upload: {} quantity records, {} value records",
            quantity_records.len(),
            value_records.len()
        );
        self.targets = quantity_records;
        self.value_targets = value_records;
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.last_sync_date = Some(stamp.clone());

        self.save(Collection::Targets)?;
        self.save(Collection::ValueTargets)?;
        self.storage.write(keys::LAST_SYNC_DATE, &stamp)
    }

    // =========================================================================
    // STOCK
    // =========================================================================

    /// Upsert the current rep's stock row for `model`.
    ///
    /// Updates quantity and timestamp in place when a row for
    /// (current user, model) exists, otherwise appends a new row with a fresh
    /// id. Rows stay unique per (rep, model).
    pub fn update_stock(&mut self, model: &str, quantity: f64) -> Result<(), StoreError> {
        let rep_id = self
            .current_user
            .as_ref()
            .map(|u| u.id)
            .ok_or(StoreError::NotLoggedIn)?;
        let now = Utc::now();

        match self
            .stocks
            .iter()
            .position(|s| s.model == model && s.rep_id == rep_id)
        {
            Some(index) => {
                let stock = &mut self.stocks[index];
                stock.quantity = quantity;
                stock.last_updated = now;
            }
            None => {
                let id = self.next_id();
                self.stocks.push(Stock {
                    id,
                    rep_id,
                    model: model.to_string(),
                    quantity,
                    last_updated: now,
                });
            }
        }
        self.save(Collection::Stocks)
    }

    // =========================================================================
    // PERFORMANCE LOOKUP
    // =========================================================================

    /// Join targets and value targets for one rep and period. Read-only.
    ///
    /// A record matches when its `RepName` equals the current user's name or
    /// the name of the user with `rep_id`, and its Month/Year loosely equal
    /// the query values (numbers and numeric strings compare equal).
    pub fn rep_performance(
        &self,
        rep_id: i64,
        month: impl Into<Value>,
        year: impl Into<Value>,
    ) -> RepPerformance {
        let month = month.into();
        let year = year.into();

        let current_name = self.current_user.as_ref().map(|u| u.name.as_str());
        let rep_name = self
            .users
            .iter()
            .find(|u| u.id == rep_id)
            .map(|u| u.name.as_str());
        let names: Vec<&str> = current_name.into_iter().chain(rep_name).collect();

        let quantity = self
            .targets
            .iter()
            .filter(|t| performance::matches(t, &names, &month, &year))
            .cloned()
            .collect();

        let value = self
            .value_targets
            .iter()
            .find(|t| performance::matches(t, &names, &month, &year))
            .map(|t| ValueAttainment {
                target: performance::metric(t.get(VALUE_TARGET)),
                achieved: performance::metric(t.get(VALUE_ACHIEVEMENT)),
            });

        RepPerformance { quantity, value }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn targets(&self) -> &[TargetRecord] {
        &self.targets
    }

    pub fn value_targets(&self) -> &[TargetRecord] {
        &self.value_targets
    }

    pub fn stocks(&self) -> &[Stock] {
        &self.stocks
    }

    /// Activity log, newest first.
    pub fn logs(&self) -> &[ActivityEntry] {
        &self.logs
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn current_view(&self) -> View {
        self.current_view
    }

    /// Raw ISO-8601 timestamp of the last master upload.
    pub fn last_sync_date(&self) -> Option<&str> {
        self.last_sync_date.as_deref()
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    /// Prepend an activity entry and persist the log.
    fn log_activity(&mut self, user_id: i64, action: &str) -> Result<(), StoreError> {
        let entry = ActivityEntry {
            id: self.next_id(),
            user_id,
            action: action.to_string(),
            timestamp: Utc::now(),
        };
        self.logs.insert(0, entry);
        self.save(Collection::Logs)
    }

    /// Next time-derived id, strictly greater than any previously issued one
    /// even when the clock has not advanced between calls.
    fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let id = if now > self.last_id {
            now
        } else {
            self.last_id + 1
        };
        self.last_id = id;
        id
    }

    /// Serialize one collection and write it through to storage.
    fn save(&self, collection: Collection) -> Result<(), StoreError> {
        let (key, payload) = match collection {
            Collection::Users => (keys::USERS, serde_json::to_string(&self.users)?),
            Collection::Targets => (keys::TARGETS, serde_json::to_string(&self.targets)?),
            Collection::ValueTargets => (
                keys::VALUE_TARGETS,
                serde_json::to_string(&self.value_targets)?,
            ),
            Collection::Stocks => (keys::STOCKS, serde_json::to_string(&self.stocks)?),
            Collection::Logs => (keys::LOGS, serde_json::to_string(&self.logs)?),
        };
        self.storage.write(key, &payload)
    }
}

/// Load a collection by key. `Ok(None)` when the key is absent; unreadable
/// payloads are logged and treated as absent rather than failing the open.
fn load_collection<T: DeserializeOwned>(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Result<Option<Vec<T>>, StoreError> {
    let Some(payload) = storage.read(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&payload) {
        Ok(records) => Ok(Some(records)),
        Err(e) => {
            tracing::warn!("Discarding unreadable payload under '{}': {}", key, e);
            Ok(None)
        }
    }
}

/// The three accounts seeded on first run, one per role.
fn default_accounts() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "Super Admin".into(),
            username: "admin".into(),
            password: "123".into(),
            role: Role::Admin,
            retail_name: None,
            avatar: "https://ui-avatars.com/api/?name=Admin&background=0D8ABC&color=fff".into(),
        },
        User {
            id: 2,
            name: "Manager One".into(),
            username: "manager".into(),
            password: "123".into(),
            role: Role::Manager,
            retail_name: None,
            avatar: "https://ui-avatars.com/api/?name=Manager&background=random".into(),
        },
        User {
            id: 3,
            name: "Rep John".into(),
            username: "rep".into(),
            password: "123".into(),
            role: Role::Rep,
            retail_name: Some("City Retailers".into()),
            avatar: "https://ui-avatars.com/api/?name=John&background=random".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn test_store() -> SessionStore {
        SessionStore::with_storage(Box::new(MemoryStorage::default()), AvatarConfig::default())
            .unwrap()
    }

    fn record(value: Value) -> TargetRecord {
        value.as_object().expect("object literal").clone()
    }

    #[test]
    fn seeds_three_default_accounts() {
        let store = test_store();
        let roles: Vec<Role> = store.users().iter().map(|u| u.role).collect();
        assert_eq!(roles, vec![Role::Admin, Role::Manager, Role::Rep]);
        assert_eq!(store.users()[2].retail_name.as_deref(), Some("City Retailers"));
    }

    #[test]
    fn does_not_reseed_over_persisted_users() {
        let storage = MemoryStorage::default();
        {
            let mut store = SessionStore::with_storage(
                Box::new(storage.clone()),
                AvatarConfig::default(),
            )
            .unwrap();
            store.delete_user(2).unwrap();
        }

        let store =
            SessionStore::with_storage(Box::new(storage), AvatarConfig::default()).unwrap();
        assert_eq!(store.users().len(), 2);
    }

    #[test]
    fn login_routes_each_role_and_logs_once() {
        let mut store = test_store();

        assert!(store.login("admin", "123").unwrap());
        assert_eq!(store.current_view(), View::Admin);
        assert_eq!(store.logs().len(), 1);
        assert_eq!(store.logs()[0].action, "Login");
        assert_eq!(store.logs()[0].user_id, 1);

        store.logout();
        assert!(store.login("manager", "123").unwrap());
        assert_eq!(store.current_view(), View::Manager);
        assert_eq!(store.logs()[0].user_id, 2);

        store.logout();
        assert!(store.login("rep", "123").unwrap());
        assert_eq!(store.current_view(), View::Rep);
        assert_eq!(store.logs().len(), 3);
    }

    #[test]
    fn failed_login_changes_nothing() {
        let mut store = test_store();

        assert!(!store.login("admin", "wrong").unwrap());
        assert!(store.current_user().is_none());
        assert_eq!(store.current_view(), View::Login);
        assert!(store.logs().is_empty());
    }

    #[test]
    fn logout_returns_to_login_view() {
        let mut store = test_store();
        store.login("rep", "123").unwrap();

        store.logout();
        assert!(store.current_user().is_none());
        assert_eq!(store.current_view(), View::Login);
    }

    #[test]
    fn change_password_rejects_wrong_old_password() {
        let mut store = test_store();
        store.login("rep", "123").unwrap();

        let err = store.change_password("nope", "456").unwrap_err();
        assert!(matches!(err, StoreError::IncorrectPassword));
        assert_eq!(store.users()[2].password, "123");
        // No "Changed Password" entry; only the login.
        assert_eq!(store.logs().len(), 1);
    }

    #[test]
    fn change_password_updates_snapshot_and_collection() {
        let mut store = test_store();
        store.login("rep", "123").unwrap();

        store.change_password("123", "456").unwrap();
        assert_eq!(store.current_user().unwrap().password, "456");
        assert_eq!(store.users()[2].password, "456");
        assert_eq!(store.logs()[0].action, "Changed Password");

        store.logout();
        assert!(!store.login("rep", "123").unwrap());
        assert!(store.login("rep", "456").unwrap());
    }

    #[test]
    fn change_password_without_login_fails() {
        let mut store = test_store();
        let err = store.change_password("123", "456").unwrap_err();
        assert!(matches!(err, StoreError::NotLoggedIn));
    }

    #[test]
    fn add_user_assigns_distinct_ids_in_succession() {
        let mut store = test_store();
        let new = |name: &str| NewUser {
            name: name.into(),
            username: name.to_lowercase(),
            password: "pw".into(),
            role: Role::Rep,
            retail_name: None,
        };

        let a = store.add_user(new("Alpha")).unwrap();
        let b = store.add_user(new("Beta")).unwrap();
        assert_ne!(a, b);
        assert_eq!(store.users().len(), 5);

        let beta = store.users().iter().find(|u| u.id == b).unwrap();
        assert_eq!(
            beta.avatar,
            "https://ui-avatars.com/api/?name=Beta&background=random"
        );
    }

    #[test]
    fn delete_user_is_a_noop_for_absent_ids() {
        let mut store = test_store();
        store.delete_user(999).unwrap();
        assert_eq!(store.users().len(), 3);

        store.delete_user(2).unwrap();
        assert_eq!(store.users().len(), 2);
    }

    #[test]
    fn update_user_replaces_matching_record_only() {
        let mut store = test_store();

        let mut rep = store.users()[2].clone();
        rep.retail_name = Some("Metro Retailers".into());
        store.update_user(rep).unwrap();
        assert_eq!(
            store.users()[2].retail_name.as_deref(),
            Some("Metro Retailers")
        );

        let mut ghost = store.users()[0].clone();
        ghost.id = 999;
        store.update_user(ghost).unwrap();
        assert_eq!(store.users().len(), 3);
    }

    #[test]
    fn update_avatar_mirrors_into_collection() {
        let mut store = test_store();
        store.login("rep", "123").unwrap();

        store.update_avatar("https://example.com/me.png").unwrap();
        assert_eq!(store.current_user().unwrap().avatar, "https://example.com/me.png");
        assert_eq!(store.users()[2].avatar, "https://example.com/me.png");
    }

    #[test]
    fn target_upload_overwrites() {
        let mut store = test_store();
        let a = record(json!({ "RepName": "Rep John", "Model": "A" }));
        let b = record(json!({ "RepName": "Rep John", "Model": "B" }));
        let c = record(json!({ "RepName": "Rep John", "Model": "C" }));

        store.process_target_upload(vec![a, b]).unwrap();
        store.process_target_upload(vec![c.clone()]).unwrap();
        assert_eq!(store.targets(), &[c]);
    }

    #[test]
    fn append_upload_preserves_order() {
        let mut store = test_store();
        let a = record(json!({ "Model": "A" }));
        let b = record(json!({ "Model": "B" }));

        store.append_target_upload(vec![a.clone()]).unwrap();
        store.append_target_upload(vec![b.clone()]).unwrap();
        assert_eq!(store.targets(), &[a, b]);
    }

    #[test]
    fn only_master_upload_stamps_sync_date() {
        let mut store = test_store();
        store
            .append_target_upload(vec![record(json!({ "Model": "A" }))])
            .unwrap();
        assert!(store.last_sync_date().is_none());

        store
            .process_master_upload(
                vec![record(json!({ "Model": "B" }))],
                vec![record(json!({ "RepName": "Rep John" }))],
            )
            .unwrap();
        let stamp = store.last_sync_date().unwrap().to_string();
        assert!(stamp.ends_with('Z'));
        assert_eq!(store.targets().len(), 1);
        assert_eq!(store.value_targets().len(), 1);

        // Per-target appends leave the stamp alone.
        store
            .append_target_upload(vec![record(json!({ "Model": "C" }))])
            .unwrap();
        assert_eq!(store.last_sync_date(), Some(stamp.as_str()));
    }

    #[test]
    fn update_stock_upserts_per_rep_and_model() {
        let mut store = test_store();
        store.login("rep", "123").unwrap();

        store.update_stock("X100", 5.0).unwrap();
        store.update_stock("X100", 9.0).unwrap();
        assert_eq!(store.stocks().len(), 1);
        assert_eq!(store.stocks()[0].quantity, 9.0);
        assert_eq!(store.stocks()[0].rep_id, 3);

        store.update_stock("X200", 2.0).unwrap();
        assert_eq!(store.stocks().len(), 2);
    }

    #[test]
    fn update_stock_requires_login() {
        let mut store = test_store();
        let err = store.update_stock("X100", 1.0).unwrap_err();
        assert!(matches!(err, StoreError::NotLoggedIn));
    }

    #[test]
    fn rep_performance_matches_loosely_across_types() {
        let mut store = test_store();
        store.login("rep", "123").unwrap();

        store
            .process_master_upload(
                vec![
                    record(json!({
                        "RepName": "Rep John", "Month": "3", "Year": 2024,
                        "Model": "X100", "Target": 20, "Achievement": 15
                    })),
                    record(json!({
                        "RepName": "Rep John", "Month": 4, "Year": 2024,
                        "Model": "X100", "Target": 10, "Achievement": 2
                    })),
                    record(json!({
                        "RepName": "Someone Else", "Month": 3, "Year": 2024,
                        "Model": "X100", "Target": 7, "Achievement": 7
                    })),
                ],
                vec![record(json!({
                    "RepName": "Rep John", "Month": 3, "Year": 2024,
                    "ValueTarget": "100", "ValueAchievement": "80"
                }))],
            )
            .unwrap();

        // month as number, year as string: loose equality must bridge both.
        let perf = store.rep_performance(3, 3, "2024");
        assert_eq!(perf.quantity.len(), 1);
        assert_eq!(perf.quantity[0]["Model"], json!("X100"));
        let value = perf.value.unwrap();
        assert_eq!(value.target, 100.0);
        assert_eq!(value.achieved, 80.0);
    }

    #[test]
    fn rep_performance_sees_the_looked_up_rep_for_other_viewers() {
        let mut store = test_store();
        store.login("manager", "123").unwrap();

        store
            .process_target_upload(vec![record(json!({
                "RepName": "Rep John", "Month": 3, "Year": 2024, "Model": "X100"
            }))])
            .unwrap();

        // Manager queries rep id 3; the match comes from the rep's name.
        let perf = store.rep_performance(3, 3, 2024);
        assert_eq!(perf.quantity.len(), 1);
        assert!(perf.value.is_none());
    }

    #[test]
    fn rep_performance_with_unparseable_value_metrics_defaults_to_zero() {
        let mut store = test_store();
        store.login("rep", "123").unwrap();

        store
            .process_master_upload(
                vec![],
                vec![record(json!({
                    "RepName": "Rep John", "Month": 3, "Year": 2024,
                    "ValueTarget": "n/a"
                }))],
            )
            .unwrap();

        let value = store.rep_performance(3, 3, 2024).value.unwrap();
        assert_eq!(value.target, 0.0);
        assert_eq!(value.achieved, 0.0);
    }

    #[test]
    fn every_mutation_round_trips_through_storage() {
        let storage = MemoryStorage::default();
        {
            let mut store = SessionStore::with_storage(
                Box::new(storage.clone()),
                AvatarConfig::default(),
            )
            .unwrap();
            store.login("rep", "123").unwrap();
            store.update_stock("X100", 5.0).unwrap();
            store
                .process_master_upload(
                    vec![record(json!({ "RepName": "Rep John", "Month": 3, "Year": 2024 }))],
                    vec![record(json!({ "RepName": "Rep John", "Month": 3, "Year": 2024 }))],
                )
                .unwrap();
            store.change_password("123", "789").unwrap();
        }

        let reloaded =
            SessionStore::with_storage(Box::new(storage), AvatarConfig::default()).unwrap();
        assert_eq!(reloaded.users()[2].password, "789");
        assert_eq!(reloaded.stocks().len(), 1);
        assert_eq!(reloaded.targets().len(), 1);
        assert_eq!(reloaded.value_targets().len(), 1);
        assert!(reloaded.last_sync_date().is_some());
        // Newest first: Changed Password, then Login.
        assert_eq!(reloaded.logs().len(), 2);
        assert_eq!(reloaded.logs()[0].action, "Changed Password");
        assert_eq!(reloaded.logs()[1].action, "Login");
        // Session state is not persisted.
        assert!(reloaded.current_user().is_none());
        assert_eq!(reloaded.current_view(), View::Login);
    }

    #[test]
    fn unreadable_collection_payload_is_treated_as_absent() {
        let storage = MemoryStorage::default();
        storage.write(keys::STOCKS, "not json").unwrap();

        let store =
            SessionStore::with_storage(Box::new(storage), AvatarConfig::default()).unwrap();
        assert!(store.stocks().is_empty());
    }
}
