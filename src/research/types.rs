use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Paper sort order accepted by the CORE search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Relevance,
    Views,
    Popularity,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::Views => "views",
            SortKey::Popularity => "popularity",
        }
    }

    /// Unknown sort strings fall back to relevance rather than failing the request.
    pub fn parse(s: &str) -> SortKey {
        match s.trim().to_ascii_lowercase().as_str() {
            "views" => SortKey::Views,
            "popularity" => SortKey::Popularity,
            _ => SortKey::Relevance,
        }
    }
}

/// Normalized search hit. Built best-effort: absent fields become empty.
/// Read-only after construction; lives for one request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paper {
    pub title: String,
    pub authors: Vec<String>,
    pub abstract_text: String,
    pub full_text: String,
    pub url: Option<String>,
    pub download_url: Option<String>,
    pub keywords: Vec<String>,
}

impl Paper {
    /// Maps one raw CORE hit into a Paper. CORE's payloads vary between API
    /// revisions, so every field is plucked defensively.
    pub fn from_core_hit(hit: &Value) -> Paper {
        Paper {
            title: pluck_str(hit, &["title"]).unwrap_or_else(|| "Untitled".to_string()),
            authors: pluck_names(hit, "authors"),
            abstract_text: pluck_str(hit, &["abstract", "description"]).unwrap_or_default(),
            full_text: pluck_str(hit, &["fullText"]).unwrap_or_default(),
            url: pluck_str(hit, &["url", "fullTextUrl"]),
            download_url: pluck_str(hit, &["downloadUrl"]),
            keywords: pluck_strings(hit, "topics"),
        }
    }

    /// Best available link: landing page, then download, in that order.
    pub fn link(&self) -> Option<&str> {
        self.url.as_deref().or(self.download_url.as_deref())
    }
}

fn pluck_str(hit: &Value, keys: &[&str]) -> Option<String> {
    for k in keys {
        if let Some(s) = hit.get(k).and_then(|v| v.as_str()) {
            let s = s.trim();
            if !s.is_empty() {
                return Some(s.to_string());
            }
        }
    }
    None
}

fn pluck_strings(hit: &Value, key: &str) -> Vec<String> {
    hit.get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

// Authors arrive either as plain strings or as objects with a "name" field.
fn pluck_names(hit: &Value, key: &str) -> Vec<String> {
    hit.get(key)
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|v| {
                    v.as_str()
                        .map(|s| s.to_string())
                        .or_else(|| v.get("name").and_then(|n| n.as_str()).map(|s| s.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Per-paper outcome of the analysis batch, as served by /analyze_papers.
#[derive(Debug, Clone, Serialize)]
pub struct PaperAnalysis {
    pub title: String,
    pub link: Option<String>,
    pub analysis: String,
    pub lim_scope: String,
    pub keywords: Vec<String>,
    #[serde(skip)]
    pub skipped: bool,
}

/// Inputs of one full orchestration run (the /analyze contract).
#[derive(Debug, Clone)]
pub struct PipelineParams {
    pub topic: String,
    pub sort: SortKey,
    pub num_papers: usize,
    pub num_ideas: usize,
    pub word_limit: usize,
    pub analysis_prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sort_key_parses_with_fallback() {
        assert_eq!(SortKey::parse("views"), SortKey::Views);
        assert_eq!(SortKey::parse("Popularity"), SortKey::Popularity);
        assert_eq!(SortKey::parse("citations"), SortKey::Relevance);
        assert_eq!(SortKey::parse(""), SortKey::Relevance);
    }

    #[test]
    fn paper_from_full_hit() {
        let hit = json!({
            "title": "Graph methods",
            "authors": [{"name": "Doe, J."}, "Smith, A."],
            "abstract": "We study graphs.",
            "fullText": "Intro...",
            "url": "https://example.org/p/1",
            "downloadUrl": "https://example.org/p/1.pdf",
            "topics": ["graphs", "ml"]
        });
        let p = Paper::from_core_hit(&hit);
        assert_eq!(p.title, "Graph methods");
        assert_eq!(p.authors, vec!["Doe, J.", "Smith, A."]);
        assert_eq!(p.abstract_text, "We study graphs.");
        assert_eq!(p.link(), Some("https://example.org/p/1"));
        assert_eq!(p.keywords, vec!["graphs", "ml"]);
    }

    #[test]
    fn paper_from_sparse_hit() {
        let p = Paper::from_core_hit(&json!({}));
        assert_eq!(p.title, "Untitled");
        assert!(p.authors.is_empty());
        assert!(p.full_text.is_empty());
        assert_eq!(p.link(), None);
    }

    #[test]
    fn link_falls_back_to_download_url() {
        let p = Paper::from_core_hit(&json!({"downloadUrl": "https://example.org/x.pdf"}));
        assert_eq!(p.link(), Some("https://example.org/x.pdf"));
    }
}
