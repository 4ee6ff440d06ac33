// ── Session store ──
//
// The signed-in state: bearer token, identity and theme preference,
// kept in a synchronous key-value store under fixed keys. The same
// `Session` is the API client's token source, so logging in or out is
// visible to the next request.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::warn;
use vitalwatch_api::TokenSource;

use crate::error::CoreError;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const THEME_KEY: &str = "theme";

// ── Storage backends ────────────────────────────────────────────────

/// Synchronous string key-value storage with interior locking.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

fn poisoned<T>(_: T) -> CoreError {
    CoreError::Session {
        message: "session store lock poisoned".into(),
    }
}

/// Process-local store; nothing survives exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries
            .write()
            .map_err(poisoned)?
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.entries.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

/// JSON-file store. The whole map is rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`. A missing file is an
    /// empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| CoreError::Session {
                message: format!("corrupt session file {}: {e}", path.display()),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(CoreError::Session {
                    message: format!("cannot read {}: {e}", path.display()),
                });
            }
        };
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), CoreError> {
        let io_err = |e: std::io::Error| CoreError::Session {
            message: format!("cannot write {}: {e}", self.path.display()),
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| CoreError::Internal(format!("session serialization: {e}")))?;
        std::fs::write(&self.path, raw).map_err(io_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
    }

    /// Writes to disk first; the in-memory map only changes once that succeeds.
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        let mut next = entries.clone();
        next.insert(key.to_owned(), value.to_owned());
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

// ── Session values ──────────────────────────────────────────────────

/// Identity of the signed-in admin, stored as JSON under `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    pub signed_in_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

// ── Session ─────────────────────────────────────────────────────────

/// Handle to the persisted session. Cheap to clone.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// In-memory session, for one-shot commands and tests.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn token(&self) -> Result<Option<SecretString>, CoreError> {
        Ok(self.store.get(TOKEN_KEY)?.map(SecretString::from))
    }

    pub fn set_token(&self, token: &SecretString) -> Result<(), CoreError> {
        self.store.set(TOKEN_KEY, token.expose_secret())
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }

    /// Last signed-in identity. An unreadable entry reads as signed out.
    pub fn user(&self) -> Result<Option<SessionUser>, CoreError> {
        let Some(raw) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "discarding unreadable session user");
                Ok(None)
            }
        }
    }

    pub fn set_user(&self, user: &SessionUser) -> Result<(), CoreError> {
        let raw = serde_json::to_string(user)
            .map_err(|e| CoreError::Internal(format!("session serialization: {e}")))?;
        self.store.set(USER_KEY, &raw)
    }

    /// Stored theme, or `System` when unset or unrecognized.
    pub fn theme(&self) -> Result<Theme, CoreError> {
        Ok(self
            .store
            .get(THEME_KEY)?
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default())
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), CoreError> {
        self.store.set(THEME_KEY, &theme.to_string())
    }

    /// Sign out: drop token and identity. The theme preference stays.
    pub fn clear(&self) -> Result<(), CoreError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_KEY)
    }
}

impl TokenSource for Session {
    fn bearer_token(&self) -> Option<SecretString> {
        self.token().unwrap_or_else(|e| {
            warn!(error = %e, "cannot read session token, sending unauthenticated");
            None
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user() -> SessionUser {
        SessionUser {
            username: "admin".into(),
            signed_in_at: DateTime::<Utc>::default(),
        }
    }

    #[test]
    fn clear_keeps_theme() {
        let session = Session::in_memory();
        session.set_token(&SecretString::from("tok")).unwrap();
        session.set_user(&user()).unwrap();
        session.set_theme(Theme::Dark).unwrap();
        assert!(session.is_authenticated());

        session.clear().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.user().unwrap(), None);
        assert_eq!(session.theme().unwrap(), Theme::Dark);
    }

    #[test]
    fn theme_defaults_to_system() {
        let store = Arc::new(MemoryStore::new());
        store.set(THEME_KEY, "sepia").unwrap();
        let session = Session::new(store);
        assert_eq!(session.theme().unwrap(), Theme::System);
    }

    #[test]
    fn token_source_reads_live_token() {
        let session = Session::in_memory();
        assert!(session.bearer_token().is_none());
        session.set_token(&SecretString::from("abc")).unwrap();
        assert_eq!(session.bearer_token().unwrap().expose_secret(), "abc");
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileStore::open(&path).unwrap();
        store.set(TOKEN_KEY, "persisted").unwrap();
        store.set(THEME_KEY, "light").unwrap();
        store.remove(THEME_KEY).unwrap();
        drop(store);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("persisted"));
        assert_eq!(reopened.get(THEME_KEY).unwrap(), None);
    }

    #[test]
    fn failed_write_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("state");
        let path = parent.join("session.json");
        let store = FileStore::open(&path).unwrap();
        store.set(THEME_KEY, "dark").unwrap();

        // Replace the parent directory with a plain file so writes fail.
        std::fs::remove_dir_all(&parent).unwrap();
        std::fs::write(&parent, "").unwrap();

        assert!(matches!(
            store.set(TOKEN_KEY, "lost"),
            Err(CoreError::Session { .. })
        ));
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);

        assert!(store.remove(THEME_KEY).is_err());
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn corrupt_file_is_a_session_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            FileStore::open(&path),
            Err(CoreError::Session { .. })
        ));
    }
}
