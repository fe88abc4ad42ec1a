use std::sync::Arc;
use std::time::Duration;
use sn_core::{Article, Result, TranslatedFields, TranslationProvider};
use tracing::{debug, error};

pub mod demo;
pub mod google;
pub mod libre;

pub use demo::demo_translation;
pub use google::GoogleTranslator;
pub use libre::LibreTranslator;

use crate::Config;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Ordered translation chain. Providers are tried in turn and the first
/// non-empty answer wins; when all of them come up empty the demo table is
/// used, so `translate` always produces a string.
#[derive(Clone, Default)]
pub struct Translator {
    providers: Vec<Arc<dyn TranslationProvider>>,
}

impl Translator {
    pub fn new(providers: Vec<Arc<dyn TranslationProvider>>) -> Self {
        Self { providers }
    }

    /// Google first when a key is configured, then LibreTranslate.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut providers: Vec<Arc<dyn TranslationProvider>> = Vec::new();
        if let Some(key) = config.google_api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            providers.push(Arc::new(GoogleTranslator::new(key.clone(), config.google_url.as_deref())?));
        }
        providers.push(Arc::new(LibreTranslator::new(config.libretranslate_url.as_deref())?));
        Ok(Self::new(providers))
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn translate(&self, text: &str, target: &str, source: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        for provider in &self.providers {
            match provider.translate(text, target, source).await {
                Ok(Some(translated)) if !translated.trim().is_empty() => {
                    debug!(provider = provider.name(), target, source, "translated text");
                    return translated;
                }
                Ok(_) => debug!(provider = provider.name(), "provider returned no translation"),
                Err(e) => error!(provider = provider.name(), error = %e, "translation provider failed"),
            }
        }

        demo_translation(text)
    }

    /// Translate title, description and content independently. Empty
    /// fields are skipped and stay `None`.
    pub async fn translate_article(&self, article: &Article, target: &str) -> TranslatedFields {
        let source = article.language.as_str();
        TranslatedFields {
            title: self.translate_field(Some(&article.title), target, source).await,
            description: self.translate_field(article.description.as_deref(), target, source).await,
            content: self.translate_field(article.content.as_deref(), target, source).await,
        }
    }

    async fn translate_field(&self, text: Option<&str>, target: &str, source: &str) -> Option<String> {
        match text {
            Some(text) if !text.is_empty() => Some(self.translate(text, target, source).await),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("providers", &self.provider_names())
            .finish()
    }
}
