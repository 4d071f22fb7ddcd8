// Copyright (c) 2026 Billbook. All Rights Reserved.

//! The client-side session: who is logged in, with which token, and which
//! features they may use.

use std::sync::{Arc, Mutex};

use serde_json;

use bb::model::{FeatureSet, Record, Session, SessionToken, UserType};
use bb::storage::{self, Storage};

#[derive(Debug, Clone)]
enum Cached {
    Unloaded,
    Absent,
    Present(Session),
}

struct SessionStoreImpl {
    storage: Arc<dyn Storage>,
    cached: Mutex<Cached>,
}

/// A caching view over the session keys held in a `Storage`.
///
/// Cloning is cheap; clones share the same cache and backing store.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreImpl>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            inner: Arc::new(SessionStoreImpl {
                storage,
                cached: Mutex::new(Cached::Unloaded),
            }),
        }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.inner.storage
    }

    fn set_cached(&self, value: Cached) {
        if let Ok(mut cached) = self.inner.cached.lock() {
            *cached = value;
        }
    }

    /// Reads the session from storage, bypassing the cache.
    ///
    /// Returns `None` unless the token and every identity field are present.
    pub fn load(&self) -> Option<Session> {
        let session = read_session(self.inner.storage.as_ref());
        self.set_cached(match session {
            Some(ref s) => Cached::Present(s.clone()),
            None => Cached::Absent,
        });
        session
    }

    /// The current session, loading it on first use.
    pub fn session(&self) -> Option<Session> {
        let cached = self
            .inner
            .cached
            .lock()
            .map(|c| c.clone())
            .unwrap_or(Cached::Unloaded);
        match cached {
            Cached::Present(session) => Some(session),
            Cached::Absent => None,
            Cached::Unloaded => self.load(),
        }
    }

    pub fn token(&self) -> Option<SessionToken> {
        self.session().map(|s| s.token().clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.session().is_some()
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.session().map(|s| s.user_type())
    }

    pub fn is_super_admin(&self) -> bool {
        self.user_type() == Some(UserType::SuperAdmin)
    }

    pub fn is_admin(&self) -> bool {
        self.user_type() == Some(UserType::Admin)
    }

    pub fn is_sub_user(&self) -> bool {
        self.user_type() == Some(UserType::SubUser)
    }

    /// Persists a complete session, and the feature set when one is given.
    pub fn save(&self, session: &Session, features: Option<&FeatureSet>) {
        let store = self.inner.storage.as_ref();
        let (first_name, last_name) = session.first_and_last_name();

        store.set(storage::TOKEN, session.token().as_ref());
        store.set(storage::USER_CODE, session.user_code());
        store.set(storage::USER_TYPE, session.user_type().as_str());
        store.set(storage::USER_ROLE, session.user_type().as_str());
        store.set(storage::USER_NAME, session.user_name());
        store.set(storage::USERNAME, session.user_name());
        store.set(storage::FIRST_NAME, &first_name);
        store.set(storage::LAST_NAME, &last_name);
        store.set(storage::ORGANIZATION_NAME, session.organization_name());
        match session.organization_logo() {
            Some(logo) => store.set(storage::ORGANIZATION_LOGO, logo),
            None => store.remove(storage::ORGANIZATION_LOGO),
        }
        store.set(storage::USER_EMAIL, session.user_email());
        if let Ok(info) = serde_json::to_string(session) {
            store.set(storage::USER_INFO, &info);
        }
        if let Some(features) = features {
            self.set_features(features);
        }

        self.set_cached(Cached::Present(session.clone()));
    }

    /// Removes every session and feature key. Clearing twice is a no-op.
    pub fn clear(&self) {
        self.inner.storage.clear_all();
        self.set_cached(Cached::Absent);
    }

    /// The stored feature set, or the basic set if none is stored.
    pub fn features(&self) -> FeatureSet {
        self.inner
            .storage
            .get(storage::AVAILABLE_FEATURES)
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
            .map(|codes| codes.into_iter().collect())
            .unwrap_or_default()
    }

    pub fn set_features(&self, features: &FeatureSet) {
        if let Ok(raw) = serde_json::to_string(features) {
            self.inner.storage.set(storage::AVAILABLE_FEATURES, &raw);
        }
    }

    pub fn has_feature(&self, code: &str) -> bool {
        self.features().contains(code)
    }

    pub fn dark_mode(&self) -> bool {
        self.inner.storage.get(storage::DARK_MODE).map_or(false, |v| v == "true")
    }

    pub fn set_dark_mode(&self, enabled: bool) {
        self.inner
            .storage
            .set(storage::DARK_MODE, if enabled { "true" } else { "false" });
    }

    /// Cached business information for the logged in admin, if any.
    pub fn business_information(&self) -> Option<Record> {
        self.inner
            .storage
            .get(storage::BUSINESS_INFORMATION)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    pub fn set_business_information(&self, info: &Record) {
        if let Ok(raw) = serde_json::to_string(info) {
            self.inner.storage.set(storage::BUSINESS_INFORMATION, &raw);
        }
    }
}

fn read_session(store: &dyn Storage) -> Option<Session> {
    let token = non_empty(store.get(storage::TOKEN))?;
    let user_code = non_empty(store.get(storage::USER_CODE))?;
    let user_type = store.get(storage::USER_TYPE)?.parse::<UserType>().ok()?;
    let user_name = non_empty(store.get(storage::USER_NAME))?;
    let organization_name = store.get(storage::ORGANIZATION_NAME)?;
    let user_email = non_empty(store.get(storage::USER_EMAIL))?;
    let organization_logo = non_empty(store.get(storage::ORGANIZATION_LOGO));

    Some(Session::new(
        SessionToken::new(token),
        user_code,
        user_type,
        user_name,
        organization_name,
        organization_logo,
        user_email,
    ))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| if v.trim().is_empty() { None } else { Some(v) })
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use bb::model::feature;
    use bb::storage::MemoryStorage;

    pub fn session() -> Session {
        Session::new(
            SessionToken::new("tok-1"),
            "ADM001",
            UserType::Admin,
            "Asha Rao",
            "Rao Traders",
            Some("https://cdn.example.com/logo.png".to_string()),
            "asha@example.com",
        )
    }

    fn store() -> (Arc<MemoryStorage>, SessionStore) {
        let backing = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(backing.clone());
        (backing, store)
    }

    #[test]
    fn empty_storage_means_logged_out() {
        let (_, store) = store();
        assert!(store.session().is_none());
        assert!(store.token().is_none());
        assert!(!store.is_logged_in());
    }

    #[test]
    fn saved_session_round_trips_through_storage() {
        let (backing, store) = store();
        store.save(&session(), None);

        assert_eq!(backing.get(storage::FIRST_NAME), Some("Asha".to_string()));
        assert_eq!(backing.get(storage::LAST_NAME), Some("Rao".to_string()));

        let reopened = SessionStore::new(backing.clone());
        assert_eq!(reopened.session(), Some(session()));
        assert!(reopened.is_admin());
        assert!(!reopened.is_super_admin());
    }

    #[test]
    fn partial_session_loads_as_none() {
        let (backing, store) = store();
        store.save(&session(), None);
        backing.remove(storage::USER_EMAIL);

        assert!(store.load().is_none());
        assert!(store.token().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let (backing, store) = store();
        store.save(&session(), Some(&FeatureSet::basic()));
        store.set_dark_mode(true);

        store.clear();
        let after_once = backing.len();
        store.clear();

        assert_eq!(after_once, 0);
        assert_eq!(backing.len(), 0);
        assert!(store.session().is_none());
        assert!(!store.dark_mode());
    }

    #[test]
    fn features_default_to_the_basic_set() {
        let (_, store) = store();
        assert!(store.has_feature(feature::CUSTOMER_MANAGEMENT));
        assert!(!store.has_feature(feature::DASHBOARD_ANALYTICS));
    }

    #[test]
    fn stored_features_replace_the_default() {
        let (backing, store) = store();
        let features: FeatureSet = vec![feature::DASHBOARD_ANALYTICS].into_iter().collect();
        store.set_features(&features);

        assert!(store.has_feature(feature::DASHBOARD_ANALYTICS));
        assert!(!store.has_feature(feature::BILL_MANAGEMENT));

        backing.set(storage::AVAILABLE_FEATURES, "not json");
        assert!(store.has_feature(feature::BILL_MANAGEMENT));
    }

    #[test]
    fn business_information_is_cached_as_json() {
        let (_, store) = store();
        assert!(store.business_information().is_none());
        store.set_business_information(&json!({"gstin": "29ABCDE1234F1Z5"}));
        assert_eq!(
            store.business_information(),
            Some(json!({"gstin": "29ABCDE1234F1Z5"}))
        );
    }
}
