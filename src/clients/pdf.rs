//! Linked-document text extraction. Downloads a PDF and pulls plain text
//! out of it; every failure mode (download, parse, extractor panic) yields
//! an empty string, which downstream code treats as "analysis skipped".

use reqwest::Client;
use std::time::Duration;
use tracing::warn;

#[derive(Clone)]
pub struct PdfTextClient {
    http: Client,
}

impl Default for PdfTextClient {
    fn default() -> Self {
        let http = Client::builder()
            .user_agent(concat!("paperscout/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("reqwest client");
        Self { http }
    }
}

impl PdfTextClient {
    pub async fn fetch_text(&self, url: &str) -> String {
        let resp = match self.http.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, url, "PDF download failed");
                return String::new();
            }
        };
        if !resp.status().is_success() {
            warn!(status = %resp.status(), url, "PDF download returned non-success");
            return String::new();
        }
        let bytes = match resp.bytes().await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, url, "PDF body read failed");
                return String::new();
            }
        };

        // pdf-extract is CPU-bound and has been known to panic on malformed
        // files; spawn_blocking isolates both concerns.
        let extracted =
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await;
        let text = match extracted {
            Ok(Ok(t)) => t,
            Ok(Err(e)) => {
                warn!(error = %e, url, "PDF text extraction failed");
                return String::new();
            }
            Err(e) => {
                warn!(error = %e, url, "PDF extraction worker panicked");
                return String::new();
            }
        };
        normalize(&text)
    }
}

// Drops blank lines and rejoins with single newlines, mirroring the
// per-page "skip empty pages" behavior of the extraction step.
fn normalize(text: &str) -> String {
    text.lines()
        .map(|l| l.trim_end())
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_drops_blank_lines() {
        assert_eq!(normalize("a\n\n  \nb  \n"), "a\nb");
        assert_eq!(normalize("\n\n"), "");
    }

    #[tokio::test]
    async fn unreachable_url_yields_empty() {
        let client = PdfTextClient::default();
        let text = client.fetch_text("http://127.0.0.1:1/missing.pdf").await;
        assert!(text.is_empty());
    }
}
