// Copyright (c) 2026 Billbook. All Rights Reserved.

//! Functions to interact with the Billbook API.

use std::sync::{Arc, Mutex};

use futures::*;

use hyper;

use serde;
use serde_json;

use super::envelope::NormalizedResult;
use super::gateway::{Gateway, HttpsTransport, RequestParam, Transport};
use super::{request, response};
use bb;
use bb::config::{Config, Environment};
use bb::error::{ErrorKind, ResultExt};
use bb::model::{FeatureSet, Record, Session};
use bb::session::SessionStore;
use bb::storage::{MemoryStorage, Storage};
use bb::util::futures::into_future_trait;

struct BillbookImpl {
    config: Config,
    gateway: Gateway,
}

/// The Billbook client.
pub struct Billbook {
    // See https://users.rust-lang.org/t/best-pattern-for-async-update-of-self-object/15205
    // for notes on this pattern:
    inner: Arc<Mutex<BillbookImpl>>,
}

impl Clone for Billbook {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

// =============================================================================

// A useful alias when dealing with the fact that an endpoint does not expect
// a POST/PUT body, but a type is still expected:
type Nothing = serde_json::Value;

// =============================================================================

// Useful builder macros:
macro_rules! route {
    ($uri:expr, $($var:ident),*) => (
        format!($uri, $($var = Into::<String>::into($var)),*)
    )
}

macro_rules! param {
    ($key:expr, $value:expr) => {
        ($key.into(), $value.into())
    };
}

// Based on https://docs.rs/maplit/1.0.1/maplit/
macro_rules! params {
    () => (Vec::<RequestParam>::new()); // For empty parameter lists
    ($($key:expr => $value:expr),*) => {
        {
            let mut _p: Vec<RequestParam> = vec![];
            $(
                _p.push(param!($key, $value));
            )*
            _p
        }
    }
}

// Empty payload
macro_rules! payload {
    () => {
        None as Option<&Nothing>
    };
    ($target:expr) => {
        Some(&$target)
    };
}

macro_rules! get {
    ($target:expr, $route:expr) => {
        $target.request($route, hyper::Method::GET, params!(), payload!())
    };
    ($target:expr, $route:expr, $params:expr) => {
        $target.request($route, hyper::Method::GET, $params, payload!())
    };
}

macro_rules! post {
    ($target:expr, $route:expr) => {
        $target.request($route, hyper::Method::POST, params!(), payload!())
    };
    ($target:expr, $route:expr, $params:expr, $payload:expr) => {
        $target.request($route, hyper::Method::POST, $params, payload!($payload))
    };
}

macro_rules! put {
    ($target:expr, $route:expr, $params:expr, $payload:expr) => {
        $target.request($route, hyper::Method::PUT, $params, payload!($payload))
    };
}

macro_rules! delete {
    ($target:expr, $route:expr) => {
        $target.request($route, hyper::Method::DELETE, params!(), payload!())
    };
}

// Resource groups. These come after the macros so they can use them.
mod admin;
mod bills;
mod customers;
mod payments;
mod reports;

// ============================================================================

/// Turns a normalized result into the caller's type, or into
/// `RequestFailed` carrying the best message the server gave.
///
/// A successful response with no payload reads as an empty collection
/// when the caller asked for one.
fn into_response<Q>(result: NormalizedResult) -> bb::Result<Q>
where
    Q: serde::de::DeserializeOwned,
{
    if !result.is_ok() {
        return Err(ErrorKind::RequestFailed(result.status(), result.failure_message()).into());
    }
    let status = result.status();
    let has_payload = result.has_payload();
    match serde_json::from_value::<Q>(result.into_data()) {
        Ok(response) => Ok(response),
        Err(_) if !has_payload => serde_json::from_value(serde_json::Value::Array(vec![]))
            .chain_err(|| format!("bb:response<{}>:empty", status.as_u16())),
        Err(e) => Err(e).chain_err(|| format!("bb:response<{}>:deserialize", status.as_u16())),
    }
}

impl Billbook {
    /// Create a new Billbook API client with a process-local session store.
    pub fn new(config: Config) -> bb::Result<Self> {
        Self::with_storage(config, Arc::new(MemoryStorage::new()))
    }

    /// Create a client whose session lives in the given store.
    pub fn with_storage(config: Config, storage: Arc<dyn Storage>) -> bb::Result<Self> {
        Self::with_transport(config, Arc::new(HttpsTransport::new()?), storage)
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(
        config: Config,
        transport: Arc<dyn Transport>,
        storage: Arc<dyn Storage>,
    ) -> bb::Result<Self> {
        let gateway = Gateway::new(config.api_url()?, transport, SessionStore::new(storage));
        Ok(Self {
            inner: Arc::new(Mutex::new(BillbookImpl { config, gateway })),
        })
    }

    fn gateway(&self) -> bb::Result<Gateway> {
        self.inner
            .lock()
            .map(|inner| inner.gateway.clone())
            .map_err(|_| ErrorKind::Config("client state poisoned".into()).into())
    }

    fn request<I, P, Q, S>(
        &self,
        route: S,
        method: hyper::Method,
        params: I,
        payload: Option<&P>,
    ) -> bb::Future<Q>
    where
        I: IntoIterator<Item = RequestParam>,
        P: serde::Serialize,
        Q: 'static + Send + serde::de::DeserializeOwned,
        S: Into<String>,
    {
        let route: String = route.into();
        match self.gateway() {
            Ok(gateway) => into_future_trait(
                gateway
                    .call(&route, method, params, payload)
                    .and_then(into_response),
            ),
            Err(e) => into_future_trait(future::err(e)),
        }
    }

    /// The session store shared with the gateway.
    pub fn session_store(&self) -> SessionStore {
        self.inner.lock().map(|inner| inner.gateway.session().clone()).unwrap_or_else(|p| {
            p.into_inner().gateway.session().clone()
        })
    }

    /// The current session, if the user is logged in.
    pub fn session(&self) -> Option<Session> {
        self.session_store().session()
    }

    /// Test if the user is logged into the Billbook API.
    pub fn has_session(&self) -> bool {
        self.session_store().is_logged_in()
    }

    /// True if the logged in account (or the basic plan, when nothing is
    /// stored) includes the given feature.
    pub fn has_feature(&self, code: &str) -> bool {
        self.session_store().has_feature(code)
    }

    pub fn config(&self) -> Option<Config> {
        self.inner.lock().ok().map(|inner| inner.config.clone())
    }

    /// Set the active environment.
    pub fn set_environment(&self, env: Environment) -> bb::Result<()> {
        let config = Config::new(env);
        let url = config.api_url()?;
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| ErrorKind::Config("client state poisoned".to_string()))?;
        inner.gateway.set_base_url(url);
        inner.config = config;
        Ok(())
    }

    /// Log in to the Billbook API.
    ///
    /// If successful, the full session (and the account's feature set, when
    /// the server sends one) is stored before the future resolves. A failed
    /// login leaves any stored session untouched.
    pub fn login<S: Into<String>>(&self, email: S, password: S) -> bb::Future<Session> {
        let payload = request::Login::new(email.into(), password.into());
        let gateway = match self.gateway() {
            Ok(gateway) => gateway,
            Err(e) => return into_future_trait(future::err(e)),
        };
        let store = gateway.session().clone();

        into_future_trait(
            gateway
                .call_unguarded("/auth/login", hyper::Method::POST, params!(), Some(&payload))
                .and_then(into_response::<response::Login>)
                .and_then(move |login: response::Login| -> bb::Result<Session> {
                    let (session, features) = login.into_session()?;
                    store.save(&session, features.as_ref());
                    info!(user = %session.user_code(), "bb:login:session stored");
                    Ok(session)
                }),
        )
    }

    /// Log out. Local only: every session and feature key is cleared, no
    /// request is made.
    pub fn logout(&self) {
        self.session_store().clear();
    }

    /// Get the current user.
    pub fn get_current_user(&self) -> bb::Future<Record> {
        get!(self, "/auth/me")
    }

    /// Change the logged in user's password.
    pub fn change_password<P, Q>(&self, current: P, new: Q) -> bb::Future<Record>
    where
        P: Into<String>,
        Q: Into<String>,
    {
        let payload = request::ChangePassword::new(current, new);
        post!(self, "/auth/change-password", params!(), payload)
    }

    /// Fetch the features of the logged in account, replacing the stored set.
    pub fn get_available_features(&self) -> bb::Future<FeatureSet> {
        let store = self.session_store();
        let f: bb::Future<Vec<String>> = get!(self, "/auth/features");
        into_future_trait(f.map(move |codes| {
            let features: FeatureSet = codes.into_iter().collect();
            store.set_features(&features);
            features
        }))
    }
}
