//! Transport for the SXUDO HTTP API.

mod client;
mod error;
mod types;

pub use client::{DEFAULT_IMAGE_TIMEOUT, HttpBackend, error_from_body};
pub use error::ApiError;
pub use types::{
    ChatReply, ChatRequest, ConfigureReply, GenerateImageRequest, GenerationReply, HealthStatus,
    ImageChatRequest, ImageUpload, MemoryEntry, OllamaConnection,
};

use async_trait::async_trait;

/// The remote chat service the session controller talks to.
///
/// Every method is a single request with no retry.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError>;

    async fn image_chat(&self, request: &ImageChatRequest) -> Result<ChatReply, ApiError>;

    async fn generate_image(
        &self,
        request: &GenerateImageRequest,
    ) -> Result<GenerationReply, ApiError>;

    async fn load_memory(&self, username: &str) -> Result<Vec<MemoryEntry>, ApiError>;

    async fn clear_memory(&self, username: &str) -> Result<(), ApiError>;

    async fn health(&self) -> Result<HealthStatus, ApiError>;

    async fn configure_ollama(
        &self,
        connection: &OllamaConnection,
    ) -> Result<ConfigureReply, ApiError>;
}
