//! Hugging Face inference client for illustrative images. Returns the image
//! as base64 on success; failures are classified so routes can attach a
//! human-readable `image_error` instead of failing the request.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_URL: &str =
    "https://api-inference.huggingface.co/models/stabilityai/stable-diffusion-xl-base-1.0";

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("HF_API_KEY not set")]
    MissingApiKey,
    #[error("Model is loading. Please wait and try again.")]
    ModelLoading,
    #[error("Model not found. Please check the model name or use a different model.")]
    ModelNotFound,
    #[error("image backend http {status}: {body}")]
    Backend { status: u16, body: String },
    #[error("image generation error: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct ImageClient {
    http: Client,
    url: String,
    key: Option<String>,
}

impl ImageClient {
    pub fn new(key: Option<String>, url: Option<String>) -> Self {
        let http = Client::builder()
            .user_agent(concat!("paperscout/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("reqwest client");
        Self { http, url: url.unwrap_or_else(|| DEFAULT_URL.to_string()), key }
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    pub async fn generate(&self, prompt: &str) -> Result<String, ImageError> {
        let key = self.key.as_ref().ok_or(ImageError::MissingApiKey)?;

        crate::metrics::inc_backend_call("image", "attempt");
        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(key)
            .header(ACCEPT, "application/json")
            .json(&json!({ "inputs": prompt }))
            .send()
            .await
            .map_err(|e| {
                crate::metrics::inc_backend_call("image", "error");
                ImageError::Transport(e)
            })?;

        let status = resp.status();
        let ctype = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        if status.as_u16() == 503 {
            crate::metrics::inc_backend_call("image", "error");
            return Err(ImageError::ModelLoading);
        }
        if status.as_u16() == 404 {
            crate::metrics::inc_backend_call("image", "error");
            return Err(ImageError::ModelNotFound);
        }
        if status.is_success() && ctype.starts_with("image/") {
            let bytes = resp.bytes().await.map_err(|e| {
                crate::metrics::inc_backend_call("image", "error");
                ImageError::Transport(e)
            })?;
            crate::metrics::inc_backend_call("image", "ok");
            return Ok(BASE64.encode(&bytes));
        }

        // JSON or anything else: surface the backend's message.
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(|s| s.to_string()))
            .unwrap_or_else(|| {
                let mut preview = body.trim().to_string();
                preview.truncate(200);
                preview
            });
        crate::metrics::inc_backend_call("image", "error");
        Err(ImageError::Backend { status: status.as_u16(), body: message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_is_classified() {
        let client = ImageClient::new(None, None);
        match client.generate("a diagram").await {
            Err(ImageError::MissingApiKey) => {}
            other => panic!("expected MissingApiKey, got {other:?}"),
        }
    }

    #[test]
    fn error_messages_match_served_text() {
        assert_eq!(
            ImageError::ModelLoading.to_string(),
            "Model is loading. Please wait and try again."
        );
        assert!(ImageError::ModelNotFound.to_string().starts_with("Model not found."));
    }
}
