use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    dao::models::Identity,
    session::{AccessToken, SessionProvider},
};

use super::{
    config::PostgrestConfig,
    error::{PostgrestError, PostgrestResult},
};

const AUTH_USER_PATH: &str = "auth/v1/user";

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
}

/// Resolves the current identity by asking Supabase Auth who owns the access token.
#[derive(Clone)]
pub struct SupabaseSession {
    client: Client,
    user_url: Arc<str>,
    anon_key: Arc<str>,
    token: AccessToken,
}

impl SupabaseSession {
    /// Build a session resolver sharing `token` with the remote store.
    pub fn new(config: &PostgrestConfig, token: AccessToken) -> PostgrestResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|source| PostgrestError::ClientBuilder { source })?;

        Ok(Self {
            client,
            user_url: Arc::from(format!(
                "{}/{}",
                config.base_url.trim_end_matches('/'),
                AUTH_USER_PATH
            )),
            anon_key: Arc::from(config.anon_key.as_str()),
            token,
        })
    }

    async fn resolve(&self) -> PostgrestResult<Option<Identity>> {
        let Some(token) = self.token.get().await else {
            return Ok(None);
        };

        let response = self
            .client
            .get(self.user_url.as_ref())
            .header("apikey", self.anon_key.as_ref())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|source| PostgrestError::RequestSend {
                path: AUTH_USER_PATH.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(PostgrestError::RequestStatus {
                path: AUTH_USER_PATH.to_string(),
                status: response.status(),
                detail: "session rejected".into(),
            });
        }

        let user = response
            .json::<AuthUser>()
            .await
            .map_err(|source| PostgrestError::DecodeResponse {
                path: AUTH_USER_PATH.to_string(),
                source,
            })?;
        Ok(Some(Identity::new(user.id)))
    }
}

impl SessionProvider for SupabaseSession {
    fn current_identity(&self) -> BoxFuture<'static, Option<Identity>> {
        let session = self.clone();
        Box::pin(async move {
            match session.resolve().await {
                Ok(identity) => {
                    debug!(signed_in = identity.is_some(), "resolved session identity");
                    identity
                }
                Err(err) => {
                    warn!(error = %err, "failed to resolve session; continuing without identity");
                    None
                }
            }
        })
    }
}
