use async_trait::async_trait;
use crate::types::RawArticle;
use crate::Result;

/// Source of raw sports articles.
///
/// Implementations swallow upstream failures and return an empty list, so
/// callers only ever see "no articles".
#[async_trait]
pub trait NewsProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Top sports headlines
    async fn headlines(&self, locale: &str, language: &str, limit: u32) -> Vec<RawArticle>;

    /// Broader keyword search across all news, filtered down to sports
    async fn all_news(&self, locale: &str, language: &str, limit: u32) -> Vec<RawArticle>;
}

/// One link in the translation chain.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    fn name(&self) -> &str;

    /// `Ok(None)` means the provider had nothing to offer and the next one
    /// should be tried.
    async fn translate(&self, text: &str, target: &str, source: &str) -> Result<Option<String>>;
}
