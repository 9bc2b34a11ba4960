//! Google Generative Language ("Gemini") REST client. One prompt in, one
//! text completion out. Failures are classified so callers can tell a
//! degraded backend from legitimate content instead of sniffing sentinel
//! strings.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Error)]
pub enum GenError {
    #[error("GEMINI_API_KEY not set")]
    MissingApiKey,
    #[error("backend http {status}: {body}")]
    Backend { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned no completion text")]
    EmptyCompletion,
}

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    base: String,
    model: String,
    key: Option<String>,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(key: Option<String>, model: Option<String>, base: Option<String>) -> Self {
        let http = Client::builder()
            .user_agent(concat!("paperscout/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client");
        Self {
            http,
            base: base.unwrap_or_else(|| DEFAULT_BASE.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            key,
        }
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// Submits one prompt and returns the concatenated completion text.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenError> {
        let key = self.key.as_ref().ok_or(GenError::MissingApiKey)?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base, self.model, key
        );
        let body = GenerateRequest {
            contents: vec![Content { parts: vec![Part { text: prompt.to_string() }] }],
        };

        crate::metrics::inc_backend_call("gemini", "attempt");
        let resp = self.http.post(&url).json(&body).send().await.map_err(|e| {
            crate::metrics::inc_backend_call("gemini", "error");
            GenError::Transport(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let mut preview = body.trim().to_string();
            preview.truncate(200);
            crate::metrics::inc_backend_call("gemini", "error");
            return Err(GenError::Backend { status: status.as_u16(), body: preview });
        }

        let payload: GenerateResponse = resp.json().await.map_err(|e| {
            crate::metrics::inc_backend_call("gemini", "error");
            GenError::Transport(e)
        })?;
        let text = extract_text(&payload);
        if text.is_empty() {
            crate::metrics::inc_backend_call("gemini", "error");
            return Err(GenError::EmptyCompletion);
        }
        crate::metrics::inc_backend_call("gemini", "ok");
        Ok(text)
    }
}

fn extract_text(resp: &GenerateResponse) -> String {
    let mut out = String::new();
    for cand in &resp.candidates {
        if let Some(content) = &cand.content {
            for part in &content.parts {
                out.push_str(&part.text);
            }
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_is_classified() {
        let client = GeminiClient::new(None, None, None);
        match client.generate("hello").await {
            Err(GenError::MissingApiKey) => {}
            other => panic!("expected MissingApiKey, got {other:?}"),
        }
    }

    #[test]
    fn parses_candidate_parts() {
        let payload: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"world"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(&payload), "Hello world");
    }

    #[test]
    fn empty_candidates_extract_to_empty() {
        let payload: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(extract_text(&payload), "");
        let payload: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(extract_text(&payload), "");
    }
}
