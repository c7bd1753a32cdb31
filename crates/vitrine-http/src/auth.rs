//! Bearer token acquisition for the catalog API

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

use crate::client::HttpClient;
use crate::error::{HttpError, Result};

/// Account used against the catalog's token endpoint
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// Fetches a token once and hands out the cached copy until invalidated.
///
/// Without credentials every request goes out unauthenticated.
pub struct TokenProvider {
    token_url: Url,
    credentials: Option<Credentials>,
    cached: Mutex<Option<String>>,
}

impl TokenProvider {
    /// `base` must end with a slash (see [`crate::parse_base_url`])
    pub fn new(base: &Url, credentials: Option<Credentials>) -> Result<Self> {
        let token_url = base
            .join("auth/token")
            .map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            token_url,
            credentials,
            cached: Mutex::new(None),
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Current token, fetching one if none is cached
    pub async fn token(&self, http: &HttpClient) -> Result<Option<String>> {
        let Some(credentials) = &self.credentials else {
            return Ok(None);
        };

        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            return Ok(Some(token.clone()));
        }

        debug!("Requesting catalog token for {}", credentials.username);
        let response: TokenResponse = http
            .post_form(
                &self.token_url,
                &[
                    ("username", credentials.username.as_str()),
                    ("password", credentials.password.as_str()),
                ],
            )
            .await
            .map_err(|e| match e {
                HttpError::HttpStatus { status, message } => {
                    HttpError::Auth(format!("token endpoint returned {status}: {message}"))
                }
                other => other,
            })?;

        let token = response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| HttpError::Auth("no token returned from API".to_string()))?;
        *cached = Some(token.clone());
        Ok(Some(token))
    }

    /// Drop the cached token so the next call fetches a fresh one
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials {
            username: "shop".to_string(),
            password: "hunter2".to_string(),
        };
        let printed = format!("{credentials:?}");
        assert!(printed.contains("shop"));
        assert!(!printed.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_no_credentials_means_no_token() {
        let base = Url::parse("http://localhost:1/").unwrap();
        let provider = TokenProvider::new(&base, None).unwrap();
        let http = HttpClient::with_defaults().unwrap();
        assert_eq!(provider.token(&http).await.unwrap(), None);
    }
}
