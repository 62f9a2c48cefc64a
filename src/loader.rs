use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::error::{ConfigError, LoadError};
use crate::mapping::normalize_all;
use crate::types::ContentRecord;

const USER_AGENT: &str = concat!("sitesearch/", env!("CARGO_PKG_VERSION"));
const RESOURCE_ID_PLACEHOLDER: &str = ":resourceId";

/// Recognized response body layouts, decided once per body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// `[ {...}, ... ]`
    Array(Vec<Value>),
    /// `{ "data": [ ... ] }`
    Wrapped(Vec<Value>),
    /// First own property holding an array, e.g. `{ "items": [ ... ] }`.
    Keyed { key: String, items: Vec<Value> },
    Unknown(Value),
}

impl ResponseShape {
    pub fn detect(body: Value) -> Self {
        let mut obj = match body {
            Value::Array(items) => return Self::Array(items),
            Value::Object(obj) => obj,
            other => return Self::Unknown(other),
        };
        if obj.get("data").is_some_and(Value::is_array) {
            if let Some(Value::Array(items)) = obj.remove("data") { return Self::Wrapped(items); }
        }
        let key = obj.iter().find(|(_, v)| v.is_array()).map(|(k, _)| k.clone());
        if let Some(key) = key {
            if let Some(Value::Array(items)) = obj.remove(&key) { return Self::Keyed { key, items }; }
        }
        Self::Unknown(Value::Object(obj))
    }

    pub fn into_records(self) -> Result<Vec<ContentRecord>, LoadError> {
        match self {
            Self::Array(items) | Self::Wrapped(items) | Self::Keyed { items, .. } => Ok(normalize_all(&items)),
            Self::Unknown(_) => Err(LoadError::UnknownShape),
        }
    }
}

/// Where a widget's content comes from.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Short label for logs.
    fn describe(&self) -> String;

    /// Records available without I/O, if any. Inline sources load synchronously through this.
    fn ready_now(&self) -> Option<Vec<ContentRecord>> { None }

    async fn fetch(&self) -> Result<Vec<ContentRecord>, LoadError>;
}

pub struct InlineSource {
    items: Vec<Value>,
}

impl InlineSource {
    pub fn new(items: Vec<Value>) -> Self { Self { items } }
}

#[async_trait]
impl ContentSource for InlineSource {
    fn describe(&self) -> String { format!("inline ({} records)", self.items.len()) }
    fn ready_now(&self) -> Option<Vec<ContentRecord>> { Some(normalize_all(&self.items)) }
    async fn fetch(&self) -> Result<Vec<ContentRecord>, LoadError> { Ok(normalize_all(&self.items)) }
}

/// A JSON document on the local filesystem.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
}

#[async_trait]
impl ContentSource for FileSource {
    fn describe(&self) -> String { format!("file {}", self.path.display()) }

    async fn fetch(&self) -> Result<Vec<ContentRecord>, LoadError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Io { path: self.path.clone(), source })?;
        let body: Value = serde_json::from_slice(&bytes)?;
        ResponseShape::detect(body).into_records()
    }
}

/// A single GET against a remote endpoint, optionally with a bearer token.
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, url, api_key))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>, api_key: Option<String>) -> Self {
        Self { client, url: url.into(), api_key: api_key.filter(|k| !k.is_empty()) }
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    fn describe(&self) -> String { format!("GET {}", self.url) }

    async fn fetch(&self) -> Result<Vec<ContentRecord>, LoadError> {
        let http_err = |source: reqwest::Error| LoadError::Http { url: self.url.clone(), source };
        let mut req = self.client.get(&self.url);
        if let Some(key) = &self.api_key { req = req.bearer_auth(key); }
        let resp = req.send().await.map_err(http_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LoadError::Status { status: status.as_u16(), url: self.url.clone() });
        }
        let bytes = resp.bytes().await.map_err(http_err)?;
        let body: Value = serde_json::from_slice(&bytes)?;
        ResponseShape::detect(body).into_records()
    }
}

/// Substitute the first `:resourceId` placeholder when a resource id is set.
pub fn resolve_endpoint(template: &str, resource_id: Option<&str>) -> String {
    match resource_id.filter(|id| !id.is_empty()) {
        Some(id) if template.contains(RESOURCE_ID_PLACEHOLDER) => template.replacen(RESOURCE_ID_PLACEHOLDER, id, 1),
        _ => template.to_string(),
    }
}

/// Pick a source for an endpoint: http(s) URLs go over the network, `file://` URLs and bare paths are read from disk.
pub fn source_for_endpoint(endpoint: &str, api_key: Option<String>) -> Result<Box<dyn ContentSource>, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEndpoint { endpoint: endpoint.to_string(), reason };
    match Url::parse(endpoint) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => {
            let src = HttpSource::new(endpoint, api_key).map_err(|e| invalid(e.to_string()))?;
            Ok(Box::new(src))
        }
        Ok(u) if u.scheme() == "file" => {
            let path = u.to_file_path().map_err(|_| invalid("not a local file path".to_string()))?;
            Ok(Box::new(FileSource::new(path)))
        }
        Ok(u) => Err(invalid(format!("unsupported scheme `{}`", u.scheme()))),
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Box::new(FileSource::new(endpoint))),
        Err(e) => Err(invalid(e.to_string())),
    }
}
