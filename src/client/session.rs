use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::client::{error::ClientError, gateway::GatewayClient};

/// Key under which the bearer token is kept in durable storage.
pub const TOKEN_KEY: &str = "admin_token";

/// Durable client storage for the bearer token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, ClientError>;
    fn save(&self, token: &str) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

/// Keeps the token in a small JSON file, one key per entry.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, ClientError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ClientError::Storage(format!("Corrupt token file {}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(ClientError::Storage(e.to_string())),
        }
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ClientError::Storage(e.to_string()))?;
        }
        let json = serde_json::to_vec_pretty(entries)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| ClientError::Storage(e.to_string()))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self.read_entries()?.remove(TOKEN_KEY))
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        let mut entries = self.read_entries()?;
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.write_entries(&entries)
    }

    fn clear(&self) -> Result<(), ClientError> {
        let mut entries = self.read_entries()?;
        if entries.remove(TOKEN_KEY).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        self.slot
            .lock()
            .map(|slot| slot.clone())
            .map_err(|_| ClientError::Storage("Token slot poisoned".into()))
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| ClientError::Storage("Token slot poisoned".into()))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| ClientError::Storage("Token slot poisoned".into()))?;
        *slot = None;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated {
        token: String,
        username: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated { username: String },
    /// The gateway answered without a token.
    Rejected { reason: Option<String> },
}

/// Two-state session machine. Entering `Authenticated` persists the token,
/// entering `Anonymous` clears it.
pub struct SessionManager<S> {
    store: S,
    state: SessionState,
}

impl<S: TokenStore> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: SessionState::Anonymous,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { token, .. } => Some(token),
            SessionState::Anonymous => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { username, .. } => username.as_deref(),
            SessionState::Anonymous => None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Re-validates a stored token on load. Returns whether the session is
    /// now authenticated.
    ///
    /// An unreachable gateway leaves the session anonymous but keeps the
    /// stored token for the next attempt.
    pub async fn restore(&mut self, gateway: &dyn GatewayClient) -> Result<bool, ClientError> {
        let Some(token) = self.store.load()? else {
            self.state = SessionState::Anonymous;
            return Ok(false);
        };

        let reply = gateway.verify(&token).await.inspect_err(|e| {
            tracing::error!("Token verification failed: {}", e);
        })?;

        if reply.valid {
            self.authenticate(token, reply.username);
        } else {
            tracing::info!(
                "Stored session rejected: {}",
                reply.error.as_deref().unwrap_or("invalid token")
            );
            self.invalidate();
        }

        Ok(self.is_authenticated())
    }

    pub async fn login(
        &mut self,
        gateway: &dyn GatewayClient,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, ClientError> {
        let reply = gateway.login(username, password).await?;

        match reply.token {
            Some(token) => {
                let username = reply.username.unwrap_or_else(|| username.to_string());
                self.authenticate(token, Some(username.clone()));
                Ok(LoginOutcome::Authenticated { username })
            }
            None => {
                tracing::warn!("Login refused for '{}'", username);
                Ok(LoginOutcome::Rejected {
                    reason: reply.error,
                })
            }
        }
    }

    pub fn logout(&mut self) {
        self.invalidate();
    }

    fn authenticate(&mut self, token: String, username: Option<String>) {
        if let Err(e) = self.store.save(&token) {
            tracing::warn!("Could not persist session token: {}", e);
        }
        self.state = SessionState::Authenticated { token, username };
    }

    fn invalidate(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("Could not clear session token: {}", e);
        }
        self.state = SessionState::Anonymous;
    }
}
