//! Blocking client for the OneTimeSecret v1 API.
//!
//! Every operation performs exactly one HTTP round trip and never retries.
//! Create, generate, retrieve and burn change state on the server, so any
//! retry policy is left to the caller.

mod dispatch;

use std::fmt;

use ureq::Agent;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{OtsError, Result};
use crate::secret::{Health, SecretRecord, SecretRecordList};
use dispatch::Request;

/// Public OneTimeSecret API root.
pub const DEFAULT_BASE_URL: &str = "https://onetimesecret.com/api/v1";

/// Account email and API token used for basic auth.
///
/// Wiped from memory when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    username: String,
    token: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Client for one OneTimeSecret account.
///
/// Holds no mutable state, so a shared reference can be used from several
/// threads as far as the underlying agent allows.
#[derive(Clone)]
pub struct Client {
    credentials: Credentials,
    base_url: String,
    agent: Agent,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client for the public API. No network activity happens here.
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_base_url(Credentials::new(username, token), DEFAULT_BASE_URL)
    }

    /// Create a client against another API root, e.g. a self-hosted
    /// instance or a local mock server.
    ///
    /// The URL is only parsed when a request is made; a bad one surfaces
    /// as [`OtsError::InvalidUrl`] from the first operation.
    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Self {
        Self {
            credentials,
            base_url: base_url.into(),
            agent: default_agent(),
        }
    }

    /// Replace the HTTP agent, e.g. to configure timeouts, proxies or TLS.
    ///
    /// The default agent has no timeout and reads error statuses like any
    /// other response. An agent that turns 4xx/5xx into errors will make
    /// those surface as [`OtsError::Transport`].
    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agent = agent;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the raw `status` response without judging it.
    pub fn health(&self) -> Result<Health> {
        self.dispatch(Request::Get, &["status"])
    }

    /// Check that the service is up.
    ///
    /// Returns [`OtsError::ServiceUnavailable`] only when the server reports
    /// "offline". Failing to reach the server, read or decode its answer is
    /// reported as the corresponding exchange error instead.
    pub fn status(&self) -> Result<()> {
        let health = self.health()?;
        if health.is_offline() {
            return Err(OtsError::ServiceUnavailable);
        }
        Ok(())
    }

    /// Store `secret` and share it with `recipient`.
    ///
    /// An empty `passphrase` means none. `ttl` is in seconds and is passed
    /// through as is; the server decides what is valid. The returned record
    /// does not echo the value.
    pub fn create(
        &self,
        secret: &str,
        passphrase: &str,
        recipient: &str,
        ttl: i64,
    ) -> Result<SecretRecord> {
        let ttl = ttl.to_string();
        let form = [
            ("secret", secret),
            ("passphrase", passphrase),
            ("ttl", ttl.as_str()),
            ("recipient", recipient),
        ];
        self.dispatch(Request::PostForm(&form), &["share"])
    }

    /// Have the server generate a short secret, e.g. a temporary password.
    ///
    /// Same as [`Client::create`] except that the returned record carries the
    /// generated value.
    pub fn generate(&self, passphrase: &str, recipient: &str, ttl: i64) -> Result<SecretRecord> {
        let ttl = ttl.to_string();
        let form = [
            ("passphrase", passphrase),
            ("ttl", ttl.as_str()),
            ("recipient", recipient),
        ];
        self.dispatch(Request::PostForm(&form), &["generate"])
    }

    /// Read a secret's value. The server only allows this once per secret.
    ///
    /// A wrong passphrase is not special-cased; whatever the server answers
    /// is decoded and returned.
    pub fn retrieve(&self, secret_key: &str, passphrase: &str) -> Result<SecretRecord> {
        let form = [("secret_key", secret_key), ("passphrase", passphrase)];
        self.dispatch(Request::PostForm(&form), &["secret", secret_key])
    }

    /// Look up a secret's lifecycle without consuming it.
    pub fn retrieve_metadata(&self, metadata_key: &str) -> Result<SecretRecord> {
        self.dispatch(Request::PostEmpty, &["private", metadata_key])
    }

    /// Ask the server to destroy a secret before it is read or expires.
    ///
    /// The remote endpoint has been seen not to behave as documented, so
    /// treat the result as advisory and confirm with
    /// [`Client::retrieve_metadata`] if destruction matters.
    pub fn burn(&self, metadata_key: &str) -> Result<SecretRecord> {
        self.dispatch(Request::PostEmpty, &["private", metadata_key, "burn"])
    }

    /// List metadata for recent secrets not yet viewed, in server order.
    pub fn retrieve_recent_metadata(&self) -> Result<SecretRecordList> {
        self.dispatch(Request::Get, &["private", "recent"])
    }
}

fn default_agent() -> Agent {
    Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .into()
}

// ── Tests ────────────────────────────────────────────────────────────
