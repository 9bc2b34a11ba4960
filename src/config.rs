use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct KeysConfig {
    pub core: Option<String>,
    pub gemini: Option<String>,
    pub huggingface: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BackendsConfig {
    /// Base URL of the CORE v3 search API.
    pub core_url: Option<String>,
    /// Base URL of the Google Generative Language API.
    pub gemini_url: Option<String>,
    /// Model name for text generation (default gemini-1.5-flash).
    pub gemini_model: Option<String>,
    /// Full URL of the Hugging Face image-inference model endpoint.
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub keys: Option<KeysConfig>,
    pub backends: Option<BackendsConfig>,
}

impl Config {
    /// Loads config/paperscout.toml (or PAPERSCOUT_CONFIG), then applies env
    /// overrides. A missing or unreadable file degrades to defaults: the
    /// service must come up with env vars alone, or with nothing at all.
    pub fn load() -> (Self, PathBuf) {
        let cfg_path = env::var("PAPERSCOUT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/paperscout.toml"));
        let mut cfg = match fs::read_to_string(&cfg_path) {
            Ok(text) => toml::from_str::<Config>(&text).unwrap_or_else(|e| {
                tracing::warn!(error = %e, ?cfg_path, "config parse failed; using defaults");
                Config::default()
            }),
            Err(_) => Config::default(),
        };

        let keys = cfg.keys.get_or_insert_with(KeysConfig::default);
        if let Ok(k) = env::var("CORE_API_KEY") {
            keys.core = Some(k);
        }
        if let Ok(k) = env::var("GEMINI_API_KEY").or_else(|_| env::var("GOOGLE_API_KEY")) {
            keys.gemini = Some(k);
        }
        if let Ok(k) = env::var("HF_API_KEY") {
            keys.huggingface = Some(k);
        }

        (cfg, cfg_path)
    }

    fn key(opt: Option<&String>) -> Option<String> {
        opt.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
    }

    pub fn core_key(&self) -> Option<String> {
        Self::key(self.keys.as_ref().and_then(|k| k.core.as_ref()))
    }

    pub fn gemini_key(&self) -> Option<String> {
        Self::key(self.keys.as_ref().and_then(|k| k.gemini.as_ref()))
    }

    pub fn hf_key(&self) -> Option<String> {
        Self::key(self.keys.as_ref().and_then(|k| k.huggingface.as_ref()))
    }

    pub fn core_url(&self) -> Option<String> {
        self.backends.as_ref().and_then(|b| b.core_url.clone())
    }

    pub fn gemini_url(&self) -> Option<String> {
        self.backends.as_ref().and_then(|b| b.gemini_url.clone())
    }

    pub fn gemini_model(&self) -> Option<String> {
        self.backends.as_ref().and_then(|b| b.gemini_model.clone())
    }

    pub fn image_url(&self) -> Option<String> {
        self.backends.as_ref().and_then(|b| b.image_url.clone())
    }
}
