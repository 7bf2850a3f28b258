//! OAuth2 client-credentials exchange against the authorization service.

use serde::Deserialize;

use crate::error::ScanError;
use crate::net::{service_url, USER_AGENT};

/// Audience for clients created locally on the scanning appliance.
pub const LOCALLY_MANAGED_AUDIENCE: &str = "f-secure-atlant";

/// Audience for clients created through a central management console.
pub const POLICY_MANAGER_AUDIENCE: &str = "policy-manager";

/// Token scopes the authorization service understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Scan,
    Management,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Scan => "scan",
            Scope::Management => "management",
        }
    }
}

/// Client identity presented to the token endpoint. Built once at startup
/// and never mutated.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub audience: String,
    pub scopes: Vec<Scope>,
}

impl Credentials {
    /// Credentials for a locally managed client requesting scan access.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            audience: LOCALLY_MANAGED_AUDIENCE.to_string(),
            scopes: vec![Scope::Scan],
        }
    }
}

/// Bearer token plus the server's expiry hint. Lives for a single run.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct OAuthErrorBody {
    error: String,
    error_description: String,
}

/// Performs the client-credentials exchange. One POST per call; no retry
/// and no token caching.
pub struct AuthClient {
    http: reqwest::Client,
    token_url: String,
}

impl AuthClient {
    pub fn new(address: &str) -> Result<Self, ScanError> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            token_url: format!("{}/api/token/v1", service_url(address)),
        })
    }

    pub async fn fetch_token(&self, credentials: &Credentials) -> Result<AccessToken, ScanError> {
        tracing::debug!(client_id = %credentials.client_id, "requesting access token");

        let mut form = vec![
            ("grant_type", "client_credentials".to_string()),
            ("client_id", credentials.client_id.clone()),
            ("client_secret", credentials.client_secret.clone()),
            ("audience", credentials.audience.clone()),
        ];
        if !credentials.scopes.is_empty() {
            let scopes = credentials
                .scopes
                .iter()
                .map(|scope| scope.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            form.push(("scope", scopes));
        }

        let response = self.http.post(&self.token_url).form(&form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::OK {
            let token: AccessToken = serde_json::from_str(&body)?;
            return Ok(token);
        }

        let failure: OAuthErrorBody = serde_json::from_str(&body)?;
        Err(ScanError::Auth {
            error: failure.error,
            description: failure.error_description,
        })
    }
}
