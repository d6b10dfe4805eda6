//! Shared HTTP client for the hosted backend.

use super::{BackendError, BackendResult};
use crate::config::BackendConfig;
use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt;

const REST_PATH: &str = "rest/v1";
const STORAGE_PATH: &str = "storage/v1/object";
const AUTH_PATH: &str = "auth/v1";
const FUNCTIONS_PATH: &str = "functions/v1";

/// Cache lifetime, in seconds, requested for uploaded objects.
const OBJECT_CACHE_CONTROL: &str = "3600";

/// A single query-string pair in the backend's filter dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    key: String,
    value: String,
}

impl Filter {
    /// Matches rows whose `column` equals `value`.
    #[must_use]
    pub fn eq(column: &str, value: impl fmt::Display) -> Self {
        Self {
            key: column.to_owned(),
            value: format!("eq.{value}"),
        }
    }

    /// Orders rows by `column`, oldest first.
    #[must_use]
    pub fn order_asc(column: &str) -> Self {
        Self {
            key: "order".to_owned(),
            value: format!("{column}.asc"),
        }
    }

    /// Orders rows by `column`, newest first.
    #[must_use]
    pub fn order_desc(column: &str) -> Self {
        Self {
            key: "order".to_owned(),
            value: format!("{column}.desc"),
        }
    }

    fn pair(&self) -> (&str, &str) {
        (&self.key, &self.value)
    }
}

/// User record returned by the session endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    /// Opaque user identifier.
    pub id: String,
    /// Email address, if the account has one.
    #[serde(default)]
    pub email: Option<String>,
    /// Free-form metadata attached at sign-up.
    #[serde(default)]
    pub user_metadata: Option<serde_json::Value>,
}

impl AuthUser {
    /// Returns `user_metadata.name` when present and a string.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.user_metadata
            .as_ref()
            .and_then(|metadata| metadata.get("name"))
            .and_then(serde_json::Value::as_str)
    }
}

#[derive(Serialize)]
struct RemovePrefixes<'a> {
    prefixes: &'a [&'a str],
}

/// Authenticated client for the hosted backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl BackendClient {
    /// Creates a client from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Config`] when the base URL or API key is empty.
    pub fn new(
        http: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
        access_token: Option<String>,
    ) -> BackendResult<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(BackendError::Config("backend url is empty".to_owned()));
        }
        let key = api_key.into();
        if key.trim().is_empty() {
            return Err(BackendError::Config("api key is empty".to_owned()));
        }
        Ok(Self {
            http,
            base_url: trimmed.to_owned(),
            api_key: key,
            access_token: access_token.filter(|token| !token.trim().is_empty()),
        })
    }

    /// Creates a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Config`] when required values are missing.
    pub fn from_config(config: &BackendConfig) -> BackendResult<Self> {
        Self::new(
            reqwest::Client::new(),
            &config.url,
            config.api_key.clone(),
            config.access_token.clone(),
        )
    }

    /// Returns the configured base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Attaches the API key and bearer credential. Without a user session the
    /// API key doubles as the bearer token.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        request.header("apikey", &self.api_key).bearer_auth(bearer)
    }

    async fn send(&self, request: RequestBuilder) -> BackendResult<Response> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(BackendError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Selects rows from `table`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure, non-success status, or
    /// an undecodable body.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[Filter],
    ) -> BackendResult<Vec<T>> {
        let query: Vec<(&str, &str)> = std::iter::once(("select", "*"))
            .chain(filters.iter().map(Filter::pair))
            .collect();
        let request = self
            .http
            .get(self.url(&format!("{REST_PATH}/{table}")))
            .query(&query);
        Ok(self.send(request).await?.json().await?)
    }

    /// Inserts one row and returns the stored representation.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::EmptyRepresentation`] when the backend echoes
    /// no row, or another [`BackendError`] when the request fails.
    pub async fn insert<B, T>(&self, table: &str, row: &B) -> BackendResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = self
            .http
            .post(self.url(&format!("{REST_PATH}/{table}")))
            .header("Prefer", "return=representation")
            .json(row);
        let rows: Vec<T> = self.send(request).await?.json().await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::EmptyRepresentation(table.to_owned()))
    }

    /// Patches every row matching `filters`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the request fails.
    pub async fn update<B: Serialize + Sync>(
        &self,
        table: &str,
        filters: &[Filter],
        patch: &B,
    ) -> BackendResult<()> {
        let query: Vec<(&str, &str)> = filters.iter().map(Filter::pair).collect();
        let request = self
            .http
            .patch(self.url(&format!("{REST_PATH}/{table}")))
            .query(&query)
            .header("Prefer", "return=minimal")
            .json(patch);
        self.send(request).await?;
        Ok(())
    }

    /// Deletes every row matching `filters`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the request fails.
    pub async fn delete(&self, table: &str, filters: &[Filter]) -> BackendResult<()> {
        let query: Vec<(&str, &str)> = filters.iter().map(Filter::pair).collect();
        let request = self
            .http
            .delete(self.url(&format!("{REST_PATH}/{table}")))
            .query(&query);
        self.send(request).await?;
        Ok(())
    }

    /// Inserts a row or merges it into the row sharing `on_conflict`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the request fails.
    pub async fn upsert<B: Serialize + Sync>(
        &self,
        table: &str,
        on_conflict: &str,
        row: &B,
    ) -> BackendResult<()> {
        let request = self
            .http
            .post(self.url(&format!("{REST_PATH}/{table}")))
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(row);
        self.send(request).await?;
        Ok(())
    }

    /// Uploads an object. Existing objects at `path` are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the request fails, including a conflict
    /// status when the path is taken.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> BackendResult<()> {
        let request = self
            .http
            .post(self.url(&format!("{STORAGE_PATH}/{bucket}/{path}")))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header(reqwest::header::CACHE_CONTROL, format!("max-age={OBJECT_CACHE_CONTROL}"))
            .header("x-upsert", "false")
            .body(bytes);
        self.send(request).await?;
        Ok(())
    }

    /// Removes objects from `bucket`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the request fails.
    pub async fn remove_objects(&self, bucket: &str, paths: &[&str]) -> BackendResult<()> {
        let request = self
            .http
            .delete(self.url(&format!("{STORAGE_PATH}/{bucket}")))
            .json(&RemovePrefixes { prefixes: paths });
        self.send(request).await?;
        Ok(())
    }

    /// Builds the public URL of an object. No request is made.
    #[must_use]
    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        self.url(&format!("{STORAGE_PATH}/public/{bucket}/{path}"))
    }

    /// Returns the user bound to the access token, or `None` when the backend
    /// does not recognise a session.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] for failures other than an unauthenticated
    /// response.
    pub async fn current_user(&self) -> BackendResult<Option<AuthUser>> {
        if self.access_token.is_none() {
            return Ok(None);
        }
        let request = self.http.get(self.url(&format!("{AUTH_PATH}/user")));
        match self.send(request).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(BackendError::Status {
                status: 401 | 403, ..
            }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Ends the session bound to the access token.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the request fails.
    pub async fn sign_out(&self) -> BackendResult<()> {
        let request = self.http.post(self.url(&format!("{AUTH_PATH}/logout")));
        self.send(request).await?;
        Ok(())
    }

    /// Invokes an edge function with a JSON body and decodes its JSON reply.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure, any non-2xx status, or
    /// an undecodable reply.
    pub async fn invoke_function<B, T>(&self, name: &str, body: &B) -> BackendResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = self
            .http
            .post(self.url(&format!("{FUNCTIONS_PATH}/{name}")))
            .json(body);
        Ok(self.send(request).await?.json().await?)
    }
}
