//! HTTP client for the campus REST API.
//!
//! Implements the core seams over reqwest:
//! - [`PageFetcher`] for the cursor-paginated reference endpoints
//! - [`SinglePageLoader`] for the plain-array criteria endpoint
//! - [`ActivityEndpoint`] for the authenticated multipart create call

use async_trait::async_trait;
use campus_core::config::ApiConfig;
use campus_core::error::{CampusError, Result};
use campus_core::media::MediaHandle;
use campus_core::pagination::{Page, PageFetcher, SinglePageLoader};
use campus_core::reference::ResourceKind;
use campus_core::submission::{ActivityEndpoint, MultipartPayload, PartBody};
use reqwest::{Client, Url};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::Duration;

/// Upload name used when the image path has no file name.
const DEFAULT_FILE_NAME: &str = "image";

/// Envelope of a paginated list response.
#[derive(Debug, Deserialize)]
struct PaginatedResponse<T> {
    results: Vec<T>,
    #[serde(default)]
    next: Option<String>,
}

impl<T> From<PaginatedResponse<T>> for Page<T> {
    fn from(response: PaginatedResponse<T>) -> Self {
        Page::new(response.results, response.next.is_some())
    }
}

/// Client for the campus API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Creates a client whose requests time out after `config.timeout_secs`.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CampusError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        page_index: Option<u32>,
    ) -> Result<T> {
        let url = self.config.resource_url(kind);
        let mut request = self.client.get(&url);
        if let Some(page) = page_index {
            request = request.query(&[("page", page)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(&format!("GET {url}"), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CampusError::status(status.as_u16(), kind.to_string()));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                CampusError::Serialization {
                    format: "JSON".to_string(),
                    message: format!("Failed to decode {kind} response: {e}"),
                }
            } else {
                transport_error(&format!("GET {url}"), e)
            }
        })
    }
}

#[async_trait]
impl<T> PageFetcher<T> for ApiClient
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch(&self, kind: ResourceKind, page_index: u32) -> Result<Page<T>> {
        let response: PaginatedResponse<T> = self.get_json(kind, Some(page_index)).await?;
        Ok(response.into())
    }
}

#[async_trait]
impl<T> SinglePageLoader<T> for ApiClient
where
    T: DeserializeOwned + Send + 'static,
{
    async fn load(&self, kind: ResourceKind) -> Result<Vec<T>> {
        self.get_json(kind, None).await
    }
}

#[async_trait]
impl ActivityEndpoint for ApiClient {
    async fn create(&self, token: Option<&str>, payload: MultipartPayload) -> Result<u16> {
        let url = self.config.activities_url();
        let form = build_form(payload).await?;

        let mut request = self.client.post(&url).multipart(form);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(&format!("POST {url}"), e))?;

        let status = response.status().as_u16();
        tracing::debug!("[ApiClient] POST {} -> {}", url, status);
        Ok(status)
    }
}

/// Converts a payload into a reqwest multipart form, reading image bytes.
async fn build_form(payload: MultipartPayload) -> Result<Form> {
    let mut form = Form::new();
    for part in payload.into_parts() {
        form = match part.body {
            PartBody::Text(text) => form.text(part.name, text),
            PartBody::File(handle) => form.part(part.name, file_part(&handle).await?),
        };
    }
    Ok(form)
}

async fn file_part(handle: &MediaHandle) -> Result<Part> {
    let path = local_file_path(handle);
    let bytes = tokio::fs::read(&path).await?;
    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime.essence_str())
        .map_err(|e| CampusError::internal(format!("Invalid mime type for {}: {e}", path.display())))
}

/// Resolves a picker uri to a filesystem path.
///
/// `file://` uris are percent-decoded; anything else is taken as a plain path.
fn local_file_path(handle: &MediaHandle) -> PathBuf {
    Url::parse(&handle.local_uri)
        .ok()
        .filter(|url| url.scheme() == "file")
        .and_then(|url| url.to_file_path().ok())
        .unwrap_or_else(|| PathBuf::from(&handle.local_uri))
}

fn transport_error(context: &str, err: reqwest::Error) -> CampusError {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    CampusError::transport(format!("{context} {kind}: {err}"))
}
