use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::types::{ErrorBody, MemoryResponse};
use super::{
    ApiError, ChatBackend, ChatReply, ChatRequest, ConfigureReply, GenerateImageRequest,
    GenerationReply, HealthStatus, ImageChatRequest, MemoryEntry, OllamaConnection,
};

/// Deadline applied to image analysis, which is slow on local models.
pub const DEFAULT_IMAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// [`ChatBackend`] over HTTP with reqwest.
pub struct HttpBackend {
    client: Client,
    endpoint: String,
    request_timeout: Option<Duration>,
    image_timeout: Duration,
}

impl HttpBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            request_timeout: None,
            image_timeout: DEFAULT_IMAGE_TIMEOUT,
        }
    }

    /// Applies a deadline to every request except image analysis.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_image_timeout(mut self, timeout: Duration) -> Self {
        self.image_timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint)
    }

    fn memory_url(&self, username: &str) -> Result<String, ApiError> {
        let mut url = reqwest::Url::parse(&self.url("/api/memory/"))
            .map_err(|e| ApiError::Network(format!("invalid endpoint: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::Network("endpoint cannot be a base URL".to_string()))?
            .pop_if_empty()
            .push(username);
        Ok(url.to_string())
    }

    async fn send(
        &self,
        request: RequestBuilder,
        timeout: Option<Duration>,
    ) -> Result<Response, ApiError> {
        let request = match timeout {
            Some(t) => request.timeout(t),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e, timeout))?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "backend responded");

        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(error_from_body(status.as_u16(), &body))
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        timeout: Option<Duration>,
    ) -> Result<T, ApiError> {
        let response = self.send(request, timeout).await?;
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_transport(&e, timeout))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

/// Builds the error for a non-2xx response.
///
/// A JSON `{error, suggestion}` body is used as-is; anything else becomes
/// `HTTP <status>: <body>`.
pub fn error_from_body(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => ApiError::Status {
            status,
            message: parsed.error,
            suggestion: parsed.suggestion,
        },
        Err(_) => ApiError::Status {
            status,
            message: format!("HTTP {status}: {}", body.trim()),
            suggestion: None,
        },
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        let builder = self.client.post(self.url("/api/chat")).json(request);
        self.send_json(builder, self.request_timeout).await
    }

    async fn image_chat(&self, request: &ImageChatRequest) -> Result<ChatReply, ApiError> {
        let image = Part::bytes(request.image.data.to_vec())
            .file_name(request.image.file_name.clone())
            .mime_str(&request.image.mime_type)
            .map_err(|e| ApiError::Network(format!("invalid image type: {e}")))?;

        let form = Form::new()
            .part("image", image)
            .text("message", request.message.clone())
            .text("username", request.username.clone());

        let builder = self
            .client
            .post(self.url("/api/image-chat"))
            .multipart(form);
        self.send_json(builder, Some(self.image_timeout)).await
    }

    async fn generate_image(
        &self,
        request: &GenerateImageRequest,
    ) -> Result<GenerationReply, ApiError> {
        let form = Form::new()
            .text("prompt", request.prompt.clone())
            .text("username", request.username.clone());

        let builder = self
            .client
            .post(self.url("/api/generate-image"))
            .multipart(form);
        self.send_json(builder, self.request_timeout).await
    }

    async fn load_memory(&self, username: &str) -> Result<Vec<MemoryEntry>, ApiError> {
        let builder = self.client.get(self.memory_url(username)?);
        let memory: MemoryResponse = self.send_json(builder, self.request_timeout).await?;
        Ok(memory.history)
    }

    async fn clear_memory(&self, username: &str) -> Result<(), ApiError> {
        let builder = self.client.delete(self.memory_url(username)?);
        self.send(builder, self.request_timeout).await?;
        Ok(())
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let builder = self.client.get(self.url("/api/health"));
        self.send_json(builder, self.request_timeout).await
    }

    async fn configure_ollama(
        &self,
        connection: &OllamaConnection,
    ) -> Result<ConfigureReply, ApiError> {
        let builder = self
            .client
            .post(self.url("/api/configure-ollama"))
            .json(connection);
        self.send_json(builder, self.request_timeout).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_json_body() {
        let err = error_from_body(
            400,
            r#"{"error":"Cannot reach 10.0.0.5:11434","suggestion":"Run ollama serve"}"#,
        );
        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                message: "Cannot reach 10.0.0.5:11434".to_string(),
                suggestion: Some("Run ollama serve".to_string()),
            }
        );
    }

    #[test]
    fn test_error_from_plain_body() {
        let err = error_from_body(500, "Internal Server Error\n");
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_error_from_json_without_error_field() {
        let err = error_from_body(502, r#"{"detail":"bad gateway"}"#);
        assert!(err.to_string().starts_with("HTTP 502:"));
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let backend = HttpBackend::new("http://127.0.0.1:8000/");
        assert_eq!(backend.endpoint(), "http://127.0.0.1:8000");
        assert_eq!(backend.url("/api/chat"), "http://127.0.0.1:8000/api/chat");
    }

    #[test]
    fn test_memory_url_escapes_username() {
        let backend = HttpBackend::new("http://127.0.0.1:8000");
        assert_eq!(
            backend.memory_url("jane doe/x").unwrap(),
            "http://127.0.0.1:8000/api/memory/jane%20doe%2Fx"
        );
    }
}
