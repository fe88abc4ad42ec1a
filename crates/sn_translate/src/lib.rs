pub mod language;
pub mod providers;

pub use language::{detect_language, supported_languages};
pub use providers::{demo_translation, Translator};

pub const DEFAULT_TARGET_LANGUAGE: &str = "bs";

/// Credentials and endpoints for the translation chain.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub google_api_key: Option<String>,
    pub google_url: Option<String>,
    pub libretranslate_url: Option<String>,
}

pub mod prelude {
    pub use super::providers::{GoogleTranslator, LibreTranslator, Translator};
    pub use super::{Config, DEFAULT_TARGET_LANGUAGE};
    pub use sn_core::{Error, Result, TranslationProvider};
}
