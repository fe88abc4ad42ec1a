use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use sn_core::{Error, NewsProvider, RawArticle, Result};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use crate::relevance::{retain_sports, SPORTS_CATEGORY, SPORTS_SEARCH};

pub const DEFAULT_BASE_URL: &str = "https://api.thenewsapi.com/v1/news";
pub const DEMO_API_TOKEN: &str = "demo_key";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for TheNewsAPI headline and all-news endpoints.
pub struct TheNewsApiClient {
    client: Client,
    api_token: String,
    base_url: Url,
}

impl TheNewsApiClient {
    pub fn new(api_token: Option<String>, base_url: Option<&str>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url = Url::parse(base_url.unwrap_or(DEFAULT_BASE_URL))
            .map_err(|e| Error::News(format!("Invalid news API URL: {}", e)))?;
        Ok(Self {
            client,
            api_token: api_token.unwrap_or_else(|| DEMO_API_TOKEN.to_string()),
            base_url,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        let response = self
            .client
            .get(self.endpoint(path))
            .query(&[("api_token", self.api_token.as_str())])
            .query(params)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<Value>().await?)
    }

    fn base_params(locale: &str, language: &str, limit: u32) -> Vec<(&'static str, String)> {
        vec![
            ("locale", locale.to_string()),
            ("language", language.to_string()),
            ("categories", SPORTS_CATEGORY.to_string()),
            ("limit", limit.to_string()),
        ]
    }
}

impl fmt::Debug for TheNewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TheNewsApiClient")
            .field("client", &"<reqwest::Client>")
            .field("api_token", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// Headlines come grouped by category. Sports articles are taken as-is; when
/// only a general group is present it is filtered down to sports content.
pub fn extract_headlines(body: Value) -> Result<Vec<RawArticle>> {
    let Some(data) = body.get("data") else {
        return Ok(Vec::new());
    };

    if let Some(sports) = data.get("sports") {
        return Ok(serde_json::from_value(sports.clone())?);
    }
    if let Some(general) = data.get("general") {
        let articles: Vec<RawArticle> = serde_json::from_value(general.clone())?;
        return Ok(retain_sports(articles));
    }
    Ok(Vec::new())
}

/// The all-news endpoint returns a flat list that is always filtered.
pub fn extract_all(body: Value) -> Result<Vec<RawArticle>> {
    match body.get("data") {
        Some(data) => {
            let articles: Vec<RawArticle> = serde_json::from_value(data.clone())?;
            Ok(retain_sports(articles))
        }
        None => Ok(Vec::new()),
    }
}

#[async_trait]
impl NewsProvider for TheNewsApiClient {
    fn name(&self) -> &str {
        "TheNewsAPI"
    }

    async fn headlines(&self, locale: &str, language: &str, limit: u32) -> Vec<RawArticle> {
        let params = Self::base_params(locale, language, limit);
        match self.get_json("headlines", &params).await.and_then(extract_headlines) {
            Ok(articles) => {
                debug!(count = articles.len(), locale, language, "fetched sports headlines");
                articles
            }
            Err(e) => {
                error!(error = %e, "Error fetching news from API");
                Vec::new()
            }
        }
    }

    async fn all_news(&self, locale: &str, language: &str, limit: u32) -> Vec<RawArticle> {
        let mut params = Self::base_params(locale, language, limit);
        params.push(("search", SPORTS_SEARCH.to_string()));

        match self.get_json("all", &params).await.and_then(extract_all) {
            Ok(articles) => {
                debug!(count = articles.len(), locale, language, "fetched all sports news");
                articles
            }
            Err(e) => {
                error!(error = %e, "Error fetching all sports news");
                Vec::new()
            }
        }
    }
}
