use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::auth::guard::Redirect;

const ROLE_KEY: &str = "role";
const USER_KEY: &str = "user";
const FLASH_KEY: &str = "flash";

/// Coarse authorization tag handed out by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Where this role lands after signing in.
    pub fn landing_path(&self) -> &'static str {
        match self {
            Role::Admin => "/",
            Role::User => "/attendance",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// Who is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// Current authentication state. Role and identity are always present together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserSession {
    #[default]
    Anonymous,
    SignedIn { role: Role, identity: Identity },
}

impl UserSession {
    pub fn role(&self) -> Option<Role> {
        match self {
            UserSession::Anonymous => None,
            UserSession::SignedIn { role, .. } => Some(*role),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            UserSession::Anonymous => None,
            UserSession::SignedIn { identity, .. } => Some(identity),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, UserSession::SignedIn { .. })
    }
}

/// Durable per-client key/value storage the session lives in.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<T: SessionStorage + ?Sized> SessionStorage for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// The signed and encrypted session cookie.
impl SessionStorage for actix_session::Session {
    fn get(&self, key: &str) -> Option<String> {
        match actix_session::Session::get::<String>(self, key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Dropping unreadable session entry '{key}': {e}");
                actix_session::Session::remove(self, key);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = actix_session::Session::insert(self, key, value) {
            log::error!("Failed to store session entry '{key}': {e}");
        }
    }

    fn remove(&self, key: &str) {
        actix_session::Session::remove(self, key);
    }
}

/// Process-local storage, handy for tests and tools.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Reads and writes the signed-in user through a [`SessionStorage`].
pub struct SessionStore<S: SessionStorage> {
    storage: S,
    current: UserSession,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Wrap `storage` and rehydrate the session from it.
    pub fn open(storage: S) -> Self {
        let current = load(&storage);
        Self { storage, current }
    }

    pub fn current(&self) -> &UserSession {
        &self.current
    }

    pub fn into_current(self) -> UserSession {
        self.current
    }

    /// Re-read the persisted session, discarding anything malformed.
    pub fn load(&mut self) -> &UserSession {
        self.current = load(&self.storage);
        &self.current
    }

    pub fn login(&mut self, role: Role, identity: Identity) {
        persist_identity(&self.storage, &identity);
        self.storage.set(ROLE_KEY, role.as_str());
        self.current = UserSession::SignedIn { role, identity };
    }

    /// Replace the stored identity after a profile change. No-op when signed out.
    pub fn refresh_identity(&mut self, identity: Identity) {
        if let UserSession::SignedIn { role, .. } = self.current {
            persist_identity(&self.storage, &identity);
            self.current = UserSession::SignedIn { role, identity };
        }
    }

    pub fn logout(&mut self) -> Redirect {
        clear(&self.storage);
        self.current = UserSession::Anonymous;
        Redirect::Login
    }
}

fn persist_identity<S: SessionStorage>(storage: &S, identity: &Identity) {
    match serde_json::to_string(identity) {
        Ok(json) => storage.set(USER_KEY, &json),
        Err(e) => log::error!("Failed to encode session identity: {e}"),
    }
}

fn clear<S: SessionStorage>(storage: &S) {
    storage.remove(ROLE_KEY);
    storage.remove(USER_KEY);
}

fn load<S: SessionStorage>(storage: &S) -> UserSession {
    let role = storage.get(ROLE_KEY);
    let user = storage.get(USER_KEY);

    match (role, user) {
        (None, None) => UserSession::Anonymous,
        (Some(role), Some(user)) => {
            let role = role.parse::<Role>();
            let identity = serde_json::from_str::<Identity>(&user);
            match (role, identity) {
                (Ok(role), Ok(identity)) => UserSession::SignedIn { role, identity },
                (role, identity) => {
                    log::warn!(
                        "Discarding corrupt session (role ok: {}, identity ok: {})",
                        role.is_ok(),
                        identity.is_ok()
                    );
                    clear(storage);
                    UserSession::Anonymous
                }
            }
        }
        _ => {
            log::warn!("Discarding half-written session");
            clear(storage);
            UserSession::Anonymous
        }
    }
}

/// Queue a one-shot message for the next rendered page.
pub fn set_flash<S: SessionStorage>(storage: &S, message: &str) {
    storage.set(FLASH_KEY, message);
}

pub fn take_flash<S: SessionStorage>(storage: &S) -> Option<String> {
    let flash = storage.get(FLASH_KEY);
    if flash.is_some() {
        storage.remove(FLASH_KEY);
    }
    flash
}

/// Current user of an actix request.
pub fn current_user(session: &actix_session::Session) -> UserSession {
    SessionStore::open(session).into_current()
}
