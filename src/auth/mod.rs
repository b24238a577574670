//! Discovery and authentication collaborators.
//!
//! The [`DiscoveryContext`] resolves which service endpoint and resource a
//! signed-in user should talk to, mints bearer tokens silently (without an
//! interactive prompt), and invalidates server-side sessions on sign-out.
//! The protocol internals behind these calls belong to the platform; only
//! the contract consumed here is modeled.

use crate::config::Config;
use crate::error::{AuthError, AuthResult};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Result of resolving a resource or named capability via discovery.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResult {
    /// Resource identifier to request tokens for
    pub service_resource_id: String,

    /// Endpoint URI the resolved service is reachable at
    pub service_endpoint_uri: String,

    /// Identifier of the authenticated user
    pub user_id: String,
}

/// A bearer token with its expiry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// The bearer token value
    pub access_token: String,

    /// Expiry instant, RFC 3339 on the wire
    pub expires_on: DateTime<Utc>,
}

/// Collaborator that resolves service endpoints and manages tokens.
///
/// One context is shared per process lifetime; it is cheap to clone handles
/// to it via `Arc` and it holds no per-user mutable state.
pub struct DiscoveryContext {
    agent: ureq::Agent,
    discovery_url: String,
    client_id: String,
}

impl DiscoveryContext {
    /// Create a discovery context from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            agent,
            discovery_url: config.discovery_url.clone(),
            client_id: config.client_id.clone(),
        }
    }

    /// Create a discovery context against a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(discovery_url: String, client_id: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            agent,
            discovery_url,
            client_id,
        }
    }

    /// The client (application) identifier this context authenticates as.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    fn build_url(&self, path: &str) -> String {
        let base = self.discovery_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Resolve a service by its resource identifier.
    pub fn discover_resource(&self, resource_id: &str) -> AuthResult<DiscoveryResult> {
        let url = format!(
            "{}?resourceId={}",
            self.build_url("/discover/resource"),
            urlencoding::encode(resource_id)
        );
        self.fetch_discovery(&url, resource_id)
    }

    /// Resolve a service by a named capability (e.g. "MyFiles").
    pub fn discover_capability(&self, capability: &str) -> AuthResult<DiscoveryResult> {
        let url = format!(
            "{}?name={}",
            self.build_url("/discover/capability"),
            urlencoding::encode(capability)
        );
        self.fetch_discovery(&url, capability)
    }

    fn fetch_discovery(&self, url: &str, target: &str) -> AuthResult<DiscoveryResult> {
        tracing::debug!("GET {}", url);

        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| AuthError::DiscoveryFailed {
                target: target.to_string(),
                reason: e.to_string(),
            })?;

        response
            .into_json::<DiscoveryResult>()
            .map_err(|e| AuthError::DiscoveryFailed {
                target: target.to_string(),
                reason: format!("invalid discovery response: {}", e),
            })
    }

    /// Silently acquire a bearer token for a resource/user pair.
    ///
    /// No interactive prompt is involved; the platform relies on the identity
    /// previously established during discovery.
    pub fn acquire_token_silent(&self, resource_id: &str, user_id: &str) -> AuthResult<AccessToken> {
        let url = self.build_url("/token");
        tracing::debug!("POST {} (resource: {})", url, resource_id);

        let body = serde_json::json!({
            "resource": resource_id,
            "clientId": self.client_id,
            "userId": user_id,
        });

        let response = self
            .agent
            .post(&url)
            .send_json(&body)
            .map_err(|e| AuthError::TokenAcquisition(e.to_string()))?;

        response
            .into_json::<AccessToken>()
            .map_err(|e| AuthError::TokenAcquisition(format!("invalid token response: {}", e)))
    }

    /// Invalidate the server-side session for a user.
    pub fn logout(&self, user_id: &str) -> AuthResult<()> {
        let url = self.build_url("/logout");
        tracing::info!("Signing out user {}", user_id);

        let body = serde_json::json!({ "userId": user_id });

        self.agent
            .post(&url)
            .send_json(&body)
            .map_err(|e| AuthError::LogoutFailed {
                user: user_id.to_string(),
                reason: e.to_string(),
            })?;

        Ok(())
    }
}

/// Source of bearer tokens for outgoing service calls.
///
/// Every outgoing call on a service client asks its token source for a token,
/// so acquisition stays lazy and renewal is invisible to callers.
pub trait TokenSource: Send + Sync {
    /// A bearer token valid for the client's resolved resource.
    fn access_token(&self) -> AuthResult<String>;
}

/// Token renewal margin. A cached token this close to expiry is not reused.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// [`TokenSource`] that mints tokens via silent acquisition and caches them
/// until close to expiry.
pub struct SilentTokenSource {
    discovery: Arc<DiscoveryContext>,
    resource_id: String,
    user_id: String,
    cached: Mutex<Option<AccessToken>>,
}

impl SilentTokenSource {
    /// Create a token source keyed to a resolved resource and user.
    pub fn new(discovery: Arc<DiscoveryContext>, resource_id: String, user_id: String) -> Self {
        Self {
            discovery,
            resource_id,
            user_id,
            cached: Mutex::new(None),
        }
    }
}

impl TokenSource for SilentTokenSource {
    fn access_token(&self) -> AuthResult<String> {
        let mut cached = self
            .cached
            .lock()
            .map_err(|_| AuthError::Other("token cache poisoned".to_string()))?;

        if let Some(token) = cached.as_ref() {
            let cutoff = Utc::now() + ChronoDuration::seconds(EXPIRY_MARGIN_SECS);
            if token.expires_on > cutoff {
                return Ok(token.access_token.clone());
            }
        }

        let token = self
            .discovery
            .acquire_token_silent(&self.resource_id, &self.user_id)?;
        let value = token.access_token.clone();
        *cached = Some(token);
        Ok(value)
    }
}

/// An authenticated session established by a sign-in.
///
/// Returned by each facade's `sign_in` and threaded explicitly into the
/// calls that need it, instead of living in process-wide mutable state.
/// Replaced wholesale by a new sign-in, never mutated in place.
#[derive(Clone)]
pub struct Session {
    discovery: Arc<DiscoveryContext>,
    user_id: String,
}

impl Session {
    /// Create a session for a signed-in user.
    pub fn new(discovery: Arc<DiscoveryContext>, user_id: String) -> Self {
        Self { discovery, user_id }
    }

    /// Identifier of the signed-in user.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The discovery context this session was established against.
    pub fn discovery(&self) -> &Arc<DiscoveryContext> {
        &self.discovery
    }

    /// Invalidate the server-side session for this user.
    pub fn sign_out(&self) -> AuthResult<()> {
        self.discovery.logout(&self.user_id)
    }
}
