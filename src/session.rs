//! Seam to the external identity provider.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::RwLock;

use crate::dao::models::Identity;

/// Answers "who is the current user"; `None` means local-only mode.
///
/// Implementations never fail: provider errors resolve to `None`.
pub trait SessionProvider: Send + Sync {
    fn current_identity(&self) -> BoxFuture<'static, Option<Identity>>;
}

/// Session pinned to a fixed identity (or to none).
#[derive(Debug, Clone, Default)]
pub struct StaticSession {
    identity: Option<Identity>,
}

impl StaticSession {
    /// Always resolve to `identity`.
    pub fn signed_in(identity: impl Into<Identity>) -> Self {
        Self {
            identity: Some(identity.into()),
        }
    }

    /// Never resolve an identity.
    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl SessionProvider for StaticSession {
    fn current_identity(&self) -> BoxFuture<'static, Option<Identity>> {
        let identity = self.identity.clone();
        Box::pin(async move { identity })
    }
}

/// Shared slot holding the bearer token handed over by the identity provider.
#[derive(Debug, Clone, Default)]
pub struct AccessToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl AccessToken {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current token.
    pub async fn set(&self, token: impl Into<String>) {
        let mut guard = self.inner.write().await;
        *guard = Some(token.into());
    }

    /// Drop the current token, signing this process out.
    pub async fn clear(&self) {
        let mut guard = self.inner.write().await;
        guard.take();
    }

    /// Current token, if any.
    pub async fn get(&self) -> Option<String> {
        self.inner.read().await.clone()
    }
}
