//! Reading image files for upload.

mod reader;

pub use reader::{ImageReader, mime_type_for};
