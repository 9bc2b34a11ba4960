use crate::clients::core::CoreClient;
use crate::clients::gemini::GeminiClient;
use crate::clients::images::ImageClient;
use crate::clients::pdf::PdfTextClient;
use crate::config::Config;
use parking_lot::RwLock;
use std::sync::Arc;

/// Stateless, dependency-injected backend clients. Each route handler
/// composes these instead of reading credentials or building HTTP clients
/// inline.
#[derive(Clone)]
pub struct AppHandles {
    pub papers: CoreClient,
    pub gemini: GeminiClient,
    pub images: ImageClient,
    pub pdf: PdfTextClient,
}

#[derive(Clone)]
pub struct AppState {
    pub version: &'static str,
    pub config: Arc<RwLock<Config>>,
    pub handles: AppHandles,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config) -> SharedState {
        let handles = AppHandles {
            papers: CoreClient::new(config.core_key(), config.core_url()),
            gemini: GeminiClient::new(config.gemini_key(), config.gemini_model(), config.gemini_url()),
            images: ImageClient::new(config.hf_key(), config.image_url()),
            pdf: PdfTextClient::default(),
        };
        Arc::new(AppState {
            version: env!("CARGO_PKG_VERSION"),
            config: Arc::new(RwLock::new(config)),
            handles,
        })
    }
}
