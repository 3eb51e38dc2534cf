use std::time::Duration;

use bytes::Bytes;
use recipebox_core::{Recipe, RecipeId};
use recipebox_logging::{rb_debug, rb_info};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{ClientError, FailureKind};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The backend's recipe endpoints. Each call is attempted exactly once.
#[async_trait::async_trait]
pub trait RecipeApi: Send + Sync {
    async fn fetch_collection(&self) -> Result<Vec<Recipe>, ClientError>;
    async fn fetch_one(&self, id: RecipeId) -> Result<Recipe, ClientError>;
    async fn submit(&self, url: &str) -> Result<Recipe, ClientError>;
    async fn update(&self, id: RecipeId, recipe: &Recipe) -> Result<Recipe, ClientError>;
    async fn remove(&self, id: RecipeId) -> Result<(), ClientError>;
}

#[derive(Deserialize)]
struct CollectionBody {
    recipes: Vec<Recipe>,
}

#[derive(Deserialize)]
struct RecipeBody {
    recipe: Recipe,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    msg: Option<String>,
}

#[derive(Serialize)]
struct SubmitPayload<'a> {
    url: &'a str,
}

#[derive(Serialize)]
struct UpdatePayload<'a> {
    recipe: &'a Recipe,
}

#[derive(Debug, Clone)]
pub struct ReqwestRecipeApi {
    client: reqwest::Client,
    base_url: String,
}

impl ReqwestRecipeApi {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let parsed = reqwest::Url::parse(&settings.base_url)
            .map_err(|err| ClientError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/recipes{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(StatusCode, Bytes), ClientError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        rb_debug!("Backend answered {} with {} bytes", status, body.len());
        Ok((status, body))
    }
}

#[async_trait::async_trait]
impl RecipeApi for ReqwestRecipeApi {
    async fn fetch_collection(&self) -> Result<Vec<Recipe>, ClientError> {
        let (status, body) = self.send(self.client.get(self.endpoint(""))).await?;
        let body: CollectionBody = decode(status, &body)?;
        Ok(body.recipes)
    }

    async fn fetch_one(&self, id: RecipeId) -> Result<Recipe, ClientError> {
        let (status, body) = self
            .send(self.client.get(self.endpoint(&format!("/{id}"))))
            .await?;
        let body: RecipeBody = decode(status, &body)?;
        Ok(body.recipe)
    }

    async fn submit(&self, url: &str) -> Result<Recipe, ClientError> {
        rb_info!("Submitting url_len={} url={}", url.len(), url);
        let request = self
            .client
            .post(self.endpoint("/add"))
            .json(&SubmitPayload { url });
        let (status, body) = self.send(request).await?;
        let body: RecipeBody = decode(status, &body)?;
        Ok(body.recipe)
    }

    async fn update(&self, id: RecipeId, recipe: &Recipe) -> Result<Recipe, ClientError> {
        let request = self
            .client
            .put(self.endpoint(&format!("/{id}")))
            .json(&UpdatePayload { recipe });
        let (status, body) = self.send(request).await?;
        let body: RecipeBody = decode(status, &body)?;
        Ok(body.recipe)
    }

    async fn remove(&self, id: RecipeId) -> Result<(), ClientError> {
        let (status, body) = self
            .send(self.client.delete(self.endpoint(&format!("/{id}"))))
            .await?;
        if status.is_success() {
            return Ok(());
        }
        Err(failure_from(status, &body))
    }
}

/// Success bodies decode to `T`. An `{"error": ...}` body is a failure
/// whatever the status says.
fn decode<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, ClientError> {
    if !status.is_success() || serde_json::from_slice::<ErrorBody>(body).is_ok() {
        return Err(failure_from(status, body));
    }
    serde_json::from_slice(body).map_err(|err| ClientError::new(FailureKind::Decode, err.to_string()))
}

fn failure_from(status: StatusCode, body: &[u8]) -> ClientError {
    if let Ok(error) = serde_json::from_slice::<ErrorBody>(body) {
        let message = error.msg.unwrap_or_else(|| error.error.clone());
        if status == StatusCode::NOT_FOUND || error.error == "NOT_FOUND" {
            return ClientError::new(FailureKind::NotFound, message);
        }
        return ClientError::new(FailureKind::Backend { code: error.error }, message);
    }
    if status == StatusCode::NOT_FOUND {
        return ClientError::new(FailureKind::NotFound, status.to_string());
    }
    ClientError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}
