//! Product API client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stockroom_core::ProductId;
use stockroom_products::ProductUpdate;

use crate::config::ConsoleConfig;
use crate::dialog::EditForm;
use crate::error::TransportError;

/// Header the server checks the CSRF token against.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// CSRF token read from the page. Kept out of `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("CsrfToken(..)")
    }
}

/// Response body shared by the update and delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Informational echo of the saved product. A shape this client does not
    /// recognise decodes as `None` rather than failing the whole response.
    #[serde(default, deserialize_with = "lenient_product")]
    pub product: Option<ProductUpdate>,
}

fn lenient_product<'de, D>(deserializer: D) -> Result<Option<ProductUpdate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match serde_json::from_value(value) {
        Ok(product) => Some(product),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unrecognised product echo");
            None
        }
    }))
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// State-changing product endpoints.
///
/// `Ok` means a well-formed JSON answer arrived, whatever its `success` flag
/// or HTTP status says.
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn update_product(
        &self,
        id: ProductId,
        form: &EditForm,
        csrf: &CsrfToken,
    ) -> Result<ApiResponse, TransportError>;

    async fn delete_product(
        &self,
        id: ProductId,
        csrf: &CsrfToken,
    ) -> Result<ApiResponse, TransportError>;
}

/// [`ProductApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpProductApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ConsoleConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, id: ProductId, action: &str) -> String {
        format!("{}/api/product/{}/{}/", self.base_url, id, action)
    }

    /// Error statuses still carry `{success: false, error}`, so the body is
    /// decoded regardless of status.
    async fn decode(resp: reqwest::Response) -> Result<ApiResponse, TransportError> {
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        serde_json::from_str(&body)
            .map_err(|e| TransportError::Parse(format!("status {}: {}", status.as_u16(), e)))
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn update_product(
        &self,
        id: ProductId,
        form: &EditForm,
        csrf: &CsrfToken,
    ) -> Result<ApiResponse, TransportError> {
        let url = self.endpoint(id, "update");
        tracing::debug!(%url, "POST product update");

        let resp = self
            .client
            .post(&url)
            .header(CSRF_HEADER, csrf.as_str())
            .form(&form.encoded_fields())
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Self::decode(resp).await
    }

    async fn delete_product(
        &self,
        id: ProductId,
        csrf: &CsrfToken,
    ) -> Result<ApiResponse, TransportError> {
        let url = self.endpoint(id, "delete");
        tracing::debug!(%url, "POST product delete");

        let resp = self
            .client
            .post(&url)
            .header(CSRF_HEADER, csrf.as_str())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Self::decode(resp).await
    }
}
