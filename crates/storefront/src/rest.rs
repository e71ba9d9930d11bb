//! REST adapter for the remote identity store.
//!
//! The hosted backend exposes the two operations this client consumes:
//!
//! - `GET  {base}/accounts?email={email}` answers `200` with the identity
//!   record, or `404` when no account matches
//! - `PUT  {base}/accounts/{email}/password` with `{"password": "..."}`
//!
//! `reqwest` handles both native and browser targets.

use serde::Serialize;

use jewelmart_account::{RemoteIdentityStore, StoreError};
use jewelmart_core::Identity;

use crate::config::StorefrontConfig;

#[derive(Debug, Serialize)]
struct UpdatePasswordRequest<'a> {
    password: &'a str,
}

/// HTTP-backed [`RemoteIdentityStore`].
#[derive(Debug, Clone)]
pub struct RestIdentityStore {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl RestIdentityStore {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
            token: None,
        }
    }

    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            token: config.api_token.clone(),
        }
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

impl RemoteIdentityStore for RestIdentityStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let url = format!("{}/accounts", self.api_url);
        let req = self.client.get(&url).query(&[("email", email)]);

        let resp = self
            .authorize(req)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(StoreError::Api(
                resp.status().as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        let identity: Identity = resp
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        Ok(Some(identity))
    }

    async fn update_password(&self, email: &str, new_password: &str) -> Result<(), StoreError> {
        let url = format!("{}/accounts/{}/password", self.api_url, email);
        let req = self
            .client
            .put(&url)
            .json(&UpdatePasswordRequest {
                password: new_password,
            });

        let resp = self
            .authorize(req)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(StoreError::Api(
                resp.status().as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        Ok(())
    }
}
