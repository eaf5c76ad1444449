//! HTTP transport for the hosted backend.
//!
//! Wraps the PostgREST data API (`/rest/v1`) with a small query builder and
//! exposes the identity service base (`/auth/v1`) to `auth`. Every request
//! carries the project's anonymous API key; the bearer token is the signed-in
//! user's access token when there is one, otherwise the anonymous key.

use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::debug;

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    access_token: Arc<RwLock<Option<String>>>,
}

impl SupabaseClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
            access_token: Arc::new(RwLock::new(None)),
        })
    }

    /// Install (or clear) the user access token sent as bearer.
    pub fn set_access_token(&self, token: Option<String>) {
        *self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn bearer(&self) -> String {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_else(|| self.anon_key.clone())
    }

    pub(crate) fn anon_key(&self) -> &str {
        &self.anon_key
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request with the API key headers and the given bearer token.
    pub(crate) fn request_with_token(&self, method: Method, url: &str, token: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", token))
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.request_with_token(method, url, &self.bearer())
    }

    /// Start a query against `table`.
    pub fn from(&self, table: &str) -> QueryBuilder<'_> {
        QueryBuilder {
            client: self,
            table: table.to_string(),
            params: Vec::new(),
        }
    }
}

/// Chained PostgREST query: `select`, filters, ordering and limit become URL
/// parameters of whichever verb finally runs it.
#[derive(Debug)]
pub struct QueryBuilder<'a> {
    client: &'a SupabaseClient,
    table: String,
    params: Vec<(String, String)>,
}

impl<'a> QueryBuilder<'a> {
    pub fn select(mut self, columns: &str) -> Self {
        // PostgREST ignores whitespace, but keep URLs tidy
        let columns: String = columns.split_whitespace().collect();
        self.params.push(("select".to_string(), columns));
        self
    }

    pub fn eq(mut self, column: &str, value: impl std::fmt::Display) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value)));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.params
            .push(("order".to_string(), format!("{}.{}", column, direction)));
        self
    }

    pub fn limit(mut self, count: usize) -> Self {
        self.params.push(("limit".to_string(), count.to_string()));
        self
    }

    pub fn on_conflict(mut self, columns: &str) -> Self {
        self.params
            .push(("on_conflict".to_string(), columns.to_string()));
        self
    }

    fn url(&self) -> String {
        format!("{}/rest/v1/{}", self.client.base_url, self.table)
    }

    fn build(&self, method: Method) -> RequestBuilder {
        debug!("{} {} {:?}", method, self.table, self.params);
        self.client.request(method, &self.url()).query(&self.params)
    }

    /// GET rows.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let response = self.build(Method::GET).send().await?;
        decode(check(response).await?).await
    }

    /// GET exactly one row. Zero rows is `Error::Remote` with code PGRST116.
    pub async fn fetch_single<T: DeserializeOwned>(self) -> Result<T> {
        let response = self
            .build(Method::GET)
            .header("Accept", "application/vnd.pgrst.object+json")
            .send()
            .await?;
        decode(check(response).await?).await
    }

    /// POST rows, returning the stored representation.
    pub async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(self, rows: &B) -> Result<Vec<T>> {
        let response = self
            .build(Method::POST)
            .header("Prefer", "return=representation")
            .json(rows)
            .send()
            .await?;
        decode(check(response).await?).await
    }

    /// POST rows, merging into existing ones on the `on_conflict` key.
    pub async fn upsert<B: Serialize + ?Sized, T: DeserializeOwned>(self, rows: &B) -> Result<Vec<T>> {
        let response = self
            .build(Method::POST)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(rows)
            .send()
            .await?;
        decode(check(response).await?).await
    }

    /// PATCH the rows matched by the filters.
    pub async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(self, fields: &B) -> Result<Vec<T>> {
        let response = self
            .build(Method::PATCH)
            .header("Prefer", "return=representation")
            .json(fields)
            .send()
            .await?;
        decode(check(response).await?).await
    }

    /// DELETE the rows matched by the filters.
    pub async fn delete(self) -> Result<()> {
        let response = self.build(Method::DELETE).send().await?;
        check(response).await?;
        Ok(())
    }
}

/// Turn a non-success response into `Error::Remote`, keeping the backend's
/// own message.
pub(crate) async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<PostgrestError>(&body) {
        Ok(err) => {
            let message = err
                .message
                .or(err.details)
                .unwrap_or_else(|| status.to_string());
            (err.code, message)
        }
        Err(_) if body.trim().is_empty() => (None, status.to_string()),
        Err(_) => (None, body),
    };

    Err(Error::Remote {
        status: status.as_u16(),
        code,
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
}
