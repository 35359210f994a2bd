use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{
    Serialize,
    de::{DeserializeOwned, IgnoredAny},
};
use tracing::debug;

use crate::{
    dao::{
        models::{ActivityEntry, Identity, LeaderboardEntry, StorageRecord},
        progress_store::ProgressStore,
        storage::StorageResult,
    },
    session::AccessToken,
};

use super::{
    config::PostgrestConfig,
    error::{PostgrestError, PostgrestErrorBody, PostgrestResult},
};

const REST_PREFIX: &str = "rest/v1";

/// Remote store backed by a PostgREST (Supabase) endpoint.
#[derive(Clone)]
pub struct PostgrestStore {
    client: Client,
    base_url: Arc<str>,
    anon_key: Arc<str>,
    saves_table: Arc<str>,
    activity_table: Arc<str>,
    leaderboard_view: Arc<str>,
    token: AccessToken,
}

impl PostgrestStore {
    /// Build the HTTP client; requests authenticate with `token` when set, the anon key otherwise.
    pub fn new(config: PostgrestConfig, token: AccessToken) -> PostgrestResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|source| PostgrestError::ClientBuilder { source })?;

        Ok(Self {
            client,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            anon_key: Arc::from(config.anon_key),
            saves_table: Arc::from(config.saves_table),
            activity_table: Arc::from(config.activity_table),
            leaderboard_view: Arc::from(config.leaderboard_view),
            token,
        })
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}/{}", self.base_url, REST_PREFIX, path);
        let bearer = self
            .token
            .get()
            .await
            .unwrap_or_else(|| self.anon_key.to_string());

        self.client
            .request(method, url)
            .header("apikey", self.anon_key.as_ref())
            .bearer_auth(bearer)
    }

    async fn send(&self, builder: RequestBuilder, path: &str) -> PostgrestResult<Response> {
        let response = builder
            .send()
            .await
            .map_err(|source| PostgrestError::RequestSend {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .json::<PostgrestErrorBody>()
            .await
            .unwrap_or_default();
        Err(PostgrestError::RequestStatus {
            path: path.to_string(),
            status,
            detail: body.describe(),
        })
    }

    async fn select_rows<T>(&self, table: &str, query: &[(&str, String)]) -> PostgrestResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let builder = self.request(Method::GET, table).await.query(query);
        let response = self.send(builder, table).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|source| PostgrestError::DecodeResponse {
                path: table.to_string(),
                source,
            })
    }

    async fn write_row<T>(
        &self,
        method: Method,
        table: &str,
        query: &[(&str, String)],
        body: &T,
    ) -> PostgrestResult<()>
    where
        T: ?Sized + Serialize,
    {
        let builder = self
            .request(method, table)
            .await
            .query(query)
            .header("Prefer", "return=minimal")
            .json(body);
        self.send(builder, table).await?;
        Ok(())
    }

    async fn ping(&self) -> PostgrestResult<()> {
        let builder = self.request(Method::GET, "").await;
        self.send(builder, REST_PREFIX).await?;
        Ok(())
    }
}

fn user_filter(identity: &Identity) -> (&'static str, String) {
    ("user_id", format!("eq.{}", identity))
}

impl ProgressStore for PostgrestStore {
    fn exists(&self, identity: &Identity) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        let identity = identity.clone();
        Box::pin(async move {
            let query = [
                ("select", "id".to_string()),
                user_filter(&identity),
                ("limit", "1".to_string()),
            ];
            let rows = store
                .select_rows::<IgnoredAny>(&store.saves_table, &query)
                .await?;
            debug!(%identity, found = !rows.is_empty(), "probed remote save");
            Ok(!rows.is_empty())
        })
    }

    fn insert(&self, record: StorageRecord) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .write_row(Method::POST, &store.saves_table, &[], &record)
                .await
                .map_err(Into::into)
        })
    }

    fn update(&self, record: StorageRecord) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let query = [user_filter(&record.user_id)];
            store
                .write_row(Method::PATCH, &store.saves_table, &query, &record)
                .await
                .map_err(Into::into)
        })
    }

    fn fetch(
        &self,
        identity: &Identity,
    ) -> BoxFuture<'static, StorageResult<Option<StorageRecord>>> {
        let store = self.clone();
        let identity = identity.clone();
        Box::pin(async move {
            // Ask for two rows so a duplicated save is reported instead of silently picked.
            let query = [
                ("select", "*".to_string()),
                user_filter(&identity),
                ("limit", "2".to_string()),
            ];
            let mut rows = store
                .select_rows::<StorageRecord>(&store.saves_table, &query)
                .await?;
            match rows.len() {
                0 => Ok(None),
                1 => Ok(rows.pop()),
                count => Err(PostgrestError::MultipleRows {
                    path: store.saves_table.to_string(),
                    count,
                }
                .into()),
            }
        })
    }

    fn record_activity(&self, entry: ActivityEntry) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .write_row(Method::POST, &store.activity_table, &[], &entry)
                .await
                .map_err(Into::into)
        })
    }

    fn leaderboard(&self, limit: usize) -> BoxFuture<'static, StorageResult<Vec<LeaderboardEntry>>> {
        let store = self.clone();
        Box::pin(async move {
            let query = [("select", "*".to_string()), ("limit", limit.to_string())];
            store
                .select_rows::<LeaderboardEntry>(&store.leaderboard_view, &query)
                .await
                .map_err(Into::into)
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }
}
