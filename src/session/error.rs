//! Errors recovered by the session controller.

use crate::api::ApiError;

/// Why a controller operation did not produce a reply.
///
/// These never escape the controller as `Err`; they are carried inside
/// the outcome enums so the caller can still inspect them.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no username set; create a profile first")]
    NoProfile,
    #[error("still waiting for the previous reply")]
    Busy,
    #[error("unsupported file type '{0}'; please choose an image")]
    UnsupportedImageType(String),
    #[error("image is {size} bytes; the limit is {limit} bytes")]
    ImageTooLarge { size: usize, limit: usize },
    #[error("invalid connection settings: {0}")]
    InvalidConnection(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}
