//! Helpers shared by the in-crate tests.

use std::net::SocketAddr;

use async_trait::async_trait;
use axum::Router;
use bytes::Bytes;
use serde_json::{json, Value};

use crate::analysis::extract::{ReadError, UploadedFile};

/// Serves `app` on an ephemeral local port.
pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// A `generateContent` response envelope carrying `text` as the model reply.
pub fn gemini_envelope(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": text }],
                "role": "model"
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 512,
            "candidatesTokenCount": 256
        }
    })
}

/// A file whose bytes are already in memory.
#[derive(Debug, Clone)]
pub struct InMemoryFile {
    file_name: String,
    mime_type: String,
    data: Bytes,
}

impl InMemoryFile {
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
}

#[async_trait]
impl UploadedFile for InMemoryFile {
    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    async fn read_bytes(&mut self) -> Result<Bytes, ReadError> {
        Ok(self.data.clone())
    }
}
