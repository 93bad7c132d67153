//! Credential storage
//!
//! Process-wide home of the access/refresh token pair. Writes happen from
//! three places only: the interceptor (login, token, logout paths), the
//! refresh routine, and the logout flow.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use shared::CredentialPair;

/// Synchronous key-value store for the two tokens
pub trait CredentialStore: Send + Sync {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    fn set_access_token(&self, token: &str);
    fn set_refresh_token(&self, token: &str);
    fn remove_tokens(&self);

    fn set_credentials(&self, pair: &CredentialPair) {
        self.set_access_token(&pair.access_token);
        self.set_refresh_token(&pair.refresh_token);
    }

    fn credentials(&self) -> Option<CredentialPair> {
        Some(CredentialPair::new(self.access_token()?, self.refresh_token()?))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTokens {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// In-memory store, lost on restart
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    tokens: RwLock<StoredTokens>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(pair: &CredentialPair) -> Self {
        let store = Self::new();
        store.set_credentials(pair);
        store
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn access_token(&self) -> Option<String> {
        self.tokens.read().access_token.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.tokens.read().refresh_token.clone()
    }

    fn set_access_token(&self, token: &str) {
        self.tokens.write().access_token = Some(token.to_string());
    }

    fn set_refresh_token(&self, token: &str) {
        self.tokens.write().refresh_token = Some(token.to_string());
    }

    fn remove_tokens(&self) {
        *self.tokens.write() = StoredTokens::default();
    }
}

/// JSON file store - survives restarts
///
/// Reads are served from memory; every write rewrites the file. Write
/// failures are logged and do not fail the caller.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    tokens: RwLock<StoredTokens>,
}

impl FileCredentialStore {
    /// Open (or lazily create) the store at `base_path/filename`
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        let path = base_path.into().join(filename);
        let tokens = Self::load(&path).unwrap_or_default();
        Self {
            path,
            tokens: RwLock::new(tokens),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Option<StoredTokens> {
        let json = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&json) {
            Ok(tokens) => Some(tokens),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable credential file");
                None
            }
        }
    }

    fn persist(&self, tokens: &StoredTokens) {
        let result = (|| -> std::io::Result<()> {
            if tokens.access_token.is_none() && tokens.refresh_token.is_none() {
                if self.path.exists() {
                    fs::remove_file(&self.path)?;
                }
                return Ok(());
            }
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(tokens)?;
            fs::write(&self.path, json)
        })();

        if let Err(e) = result {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to persist credentials");
        }
    }

    fn update(&self, f: impl FnOnce(&mut StoredTokens)) {
        let mut tokens = self.tokens.write();
        f(&mut tokens);
        self.persist(&tokens);
    }
}

impl CredentialStore for FileCredentialStore {
    fn access_token(&self) -> Option<String> {
        self.tokens.read().access_token.clone()
    }

    fn refresh_token(&self) -> Option<String> {
        self.tokens.read().refresh_token.clone()
    }

    fn set_access_token(&self, token: &str) {
        self.update(|t| t.access_token = Some(token.to_string()));
    }

    fn set_refresh_token(&self, token: &str) {
        self.update(|t| t.refresh_token = Some(token.to_string()));
    }

    fn remove_tokens(&self) {
        self.update(|t| *t = StoredTokens::default());
    }
}
