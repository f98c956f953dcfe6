//! Request and response bodies of the SXUDO HTTP API.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    pub emotion: String,
}

/// Reply to a chat or image-chat request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    #[serde(default)]
    pub emotion: Option<String>,
}

/// An image read into memory, ready to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Multipart fields of `POST /api/image-chat`.
#[derive(Debug, Clone)]
pub struct ImageChatRequest {
    pub image: ImageUpload,
    pub message: String,
    pub username: String,
}

/// Multipart fields of `POST /api/generate-image`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateImageRequest {
    pub prompt: String,
    pub username: String,
}

/// Reply to an image-generation request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerationReply {
    pub reply: String,
}

/// One remembered turn from `GET /api/memory/{username}`.
///
/// Older servers store the assistant side under `sxudo`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryEntry {
    pub user: String,
    #[serde(alias = "sxudo")]
    pub assistant: String,
    #[serde(default)]
    pub emotion: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct MemoryResponse {
    #[serde(default)]
    pub history: Vec<MemoryEntry>,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub ollama_available: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /api/configure-ollama`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OllamaConnection {
    pub host: String,
    pub port: u16,
}

/// Answer to a remote-model handshake.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfigureReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The `{error, suggestion}` shape of a non-2xx body.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub suggestion: Option<String>,
}
