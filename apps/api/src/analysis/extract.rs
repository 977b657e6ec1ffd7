//! Content extraction: turns an uploaded file handle into a string.
//!
//! PDFs are read byte-preserving (each byte becomes the Latin-1 char of the
//! same value) so the sanitizer can still find embedded text runs. Everything
//! else is decoded as UTF-8.

use async_trait::async_trait;
use axum::{
    extract::multipart::{Field, MultipartError},
    http::StatusCode,
};
use bytes::Bytes;
use thiserror::Error;

const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Error reading file: {0}")]
    Unreadable(String),

    #[error("Upload exceeds the request size limit: {0}")]
    TooLarge(String),
}

impl From<MultipartError> for ReadError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ReadError::TooLarge(e.body_text())
        } else {
            ReadError::Unreadable(e.body_text())
        }
    }
}

/// An uploaded file as seen by the pipeline.
#[async_trait]
pub trait UploadedFile: Send {
    fn mime_type(&self) -> &str;
    fn file_name(&self) -> &str;
    async fn read_bytes(&mut self) -> Result<Bytes, ReadError>;
}

/// How the raw bytes of an upload are turned into a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// One char per byte, no decoding.
    BinaryString,
    /// UTF-8 with replacement characters for invalid sequences.
    Text,
}

impl ReadMode {
    pub fn for_file(mime_type: &str, file_name: &str) -> Self {
        if mime_type == PDF_MIME {
            return Self::BinaryString;
        }
        if file_name.ends_with(".txt")
            || mime_type == "text/plain"
            || mime_type == "application/msword"
            || mime_type.contains("document")
        {
            return Self::Text;
        }
        // Unknown types are attempted as text.
        Self::Text
    }

    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::BinaryString => bytes.iter().map(|&b| char::from(b)).collect(),
            Self::Text => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Reads `file` and decodes it according to its declared type.
pub async fn extract_text(file: &mut dyn UploadedFile) -> Result<String, ReadError> {
    let mode = ReadMode::for_file(file.mime_type(), file.file_name());
    let bytes = file.read_bytes().await?;

    tracing::debug!(
        file_name = file.file_name(),
        mime_type = file.mime_type(),
        bytes = bytes.len(),
        ?mode,
        "Extracted upload content"
    );

    Ok(mode.decode(&bytes))
}

/// A multipart form field, streamed on first read.
pub struct MultipartFile<'a> {
    file_name: String,
    mime_type: String,
    field: Option<Field<'a>>,
}

impl<'a> MultipartFile<'a> {
    pub fn new(field: Field<'a>) -> Self {
        Self {
            file_name: field.file_name().unwrap_or_default().to_string(),
            mime_type: field.content_type().unwrap_or_default().to_string(),
            field: Some(field),
        }
    }
}

#[async_trait]
impl<'a> UploadedFile for MultipartFile<'a> {
    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    async fn read_bytes(&mut self) -> Result<Bytes, ReadError> {
        let field = self
            .field
            .take()
            .ok_or_else(|| ReadError::Unreadable("upload was already consumed".to_string()))?;
        Ok(field.bytes().await?)
    }
}
