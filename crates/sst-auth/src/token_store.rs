use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "sst-cli";
const KEYRING_USER: &str = "access-token";
const CREDENTIALS_FILE_NAME: &str = "credentials";
const TOKEN_ENV: &str = "SST_AUTH__TOKEN";

/// Where a loaded token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Keyring,
    Env,
    File,
    Memory,
}

impl TokenSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::File => "file",
            Self::Memory => "memory",
        }
    }
}

/// Persistent holder of the bearer token.
///
/// The client reads it before each request and clears it on a 401.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns [`AuthError::TokenStoreError`] when the token cannot be saved.
    fn store(&self, token: &str) -> Result<(), AuthError>;

    /// # Errors
    ///
    /// Returns [`AuthError::TokenStoreError`] when a stored copy cannot be
    /// removed.
    fn clear(&self) -> Result<(), AuthError>;

    fn source(&self) -> Option<TokenSource>;
}

/// Returns the keyring service name.
///
/// Defaults to `"sst-cli"`. Override via `SST_KEYRING_SERVICE` for testing
/// to avoid touching real credentials.
fn keyring_service() -> String {
    std::env::var("SST_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// OS keychain, then `SST_AUTH__TOKEN`, then `~/.sst/credentials`.
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    service: String,
    credentials_path: Option<PathBuf>,
    use_keyring: bool,
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: keyring_service(),
            credentials_path: dirs::home_dir().map(|h| h.join(".sst").join(CREDENTIALS_FILE_NAME)),
            use_keyring: true,
        }
    }

    /// File-only store rooted at `path`. Skips the keyring.
    #[must_use]
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            service: keyring_service(),
            credentials_path: Some(path.into()),
            use_keyring: false,
        }
    }

    fn entry(&self) -> Option<keyring::Entry> {
        if !self.use_keyring {
            return None;
        }
        match keyring::Entry::new(&self.service, KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::debug!(%error, "keyring unavailable");
                None
            }
        }
    }

    fn load_keyring(&self) -> Option<String> {
        self.entry()
            .and_then(|entry| entry.get_password().ok())
            .filter(|t| !t.is_empty())
    }

    fn credentials_path(&self) -> Result<&PathBuf, AuthError> {
        self.credentials_path.as_ref().ok_or_else(|| {
            AuthError::TokenStoreError("home directory not found — cannot store credentials".into())
        })
    }

    fn store_file(&self, token: &str) -> Result<(), AuthError> {
        let path = self.credentials_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(path, token)
            .map_err(|e| AuthError::TokenStoreError(format!("write {}: {e}", path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", path.display()))
            })?;
        }

        Ok(())
    }

    fn load_file(&self) -> Option<String> {
        let path = self.credentials_path.as_ref()?;
        fs::read_to_string(path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

fn load_env() -> Option<String> {
    std::env::var(TOKEN_ENV).ok().filter(|t| !t.is_empty())
}

impl TokenStore for KeyringTokenStore {
    fn load(&self) -> Option<String> {
        self.load_keyring()
            .or_else(load_env)
            .or_else(|| self.load_file())
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        match self.entry() {
            Some(entry) => match entry.set_password(token) {
                Ok(()) => Ok(()),
                Err(error) => {
                    tracing::warn!(%error, "keyring store failed; falling back to file");
                    self.store_file(token)
                }
            },
            None => self.store_file(token),
        }
    }

    fn clear(&self) -> Result<(), AuthError> {
        if let Some(entry) = self.entry() {
            let _ = entry.delete_credential();
        }

        let path = self.credentials_path()?;
        if path.exists() {
            fs::remove_file(path).map_err(|e| {
                AuthError::TokenStoreError(format!("failed to delete {}: {e}", path.display()))
            })?;
        }
        if load_env().is_some() {
            tracing::warn!("{TOKEN_ENV} is set; unset it to fully log out");
        }
        Ok(())
    }

    fn source(&self) -> Option<TokenSource> {
        if self.load_keyring().is_some() {
            return Some(TokenSource::Keyring);
        }
        if load_env().is_some() {
            return Some(TokenSource::Env);
        }
        if self.load_file().is_some() {
            return Some(TokenSource::File);
        }
        None
    }
}

/// In-process store. Counts clears so callers can assert on 401 handling.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
    clears: AtomicUsize,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
            clears: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot().clone()
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        *self.slot() = None;
        Ok(())
    }

    fn source(&self) -> Option<TokenSource> {
        self.slot().as_ref().map(|_| TokenSource::Memory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_credentials_path_is_under_home() {
        let store = KeyringTokenStore::new();
        if let Some(path) = store.credentials_path.as_ref() {
            assert!(path.ends_with(".sst/credentials"));
        }
    }

    #[test]
    fn file_store_load_clear_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let creds_path = tmp.path().join("nested").join("credentials");
        let store = KeyringTokenStore::file_only(&creds_path);

        store.store("test_jwt_abc123").expect("store");
        assert_eq!(store.load_file().as_deref(), Some("test_jwt_abc123"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&creds_path)
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "credentials file should be 0600");
        }

        store.clear().expect("clear");
        assert!(!creds_path.exists());
        assert!(store.load_file().is_none());
    }

    #[test]
    fn load_file_ignores_whitespace() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let creds_path = tmp.path().join("credentials");
        std::fs::write(&creds_path, "   \n  ").expect("write");

        let store = KeyringTokenStore::file_only(&creds_path);
        assert!(store.load_file().is_none());
    }

    #[test]
    fn memory_store_counts_clears() {
        let store = MemoryTokenStore::with_token("abc");
        assert_eq!(store.source(), Some(TokenSource::Memory));
        store.clear().unwrap();
        assert_eq!(store.load(), None);
        assert_eq!(store.clear_count(), 1);
        assert_eq!(store.source(), None);
    }
}
