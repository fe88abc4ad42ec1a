use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use sn_core::{Error, Result, TranslationProvider};
use std::fmt;
use url::Url;

use super::REQUEST_TIMEOUT;

pub const DEFAULT_GOOGLE_URL: &str = "https://translation.googleapis.com/language/translate/v2";

#[derive(Deserialize)]
struct GoogleResponse {
    data: GoogleData,
}

#[derive(Deserialize)]
struct GoogleData {
    translations: Vec<GoogleTranslation>,
}

#[derive(Deserialize)]
struct GoogleTranslation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Google Cloud Translation v2, keyed by an API key in the query string.
pub struct GoogleTranslator {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl GoogleTranslator {
    pub fn new(api_key: String, endpoint: Option<&str>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let endpoint = Url::parse(endpoint.unwrap_or(DEFAULT_GOOGLE_URL))
            .map_err(|e| Error::Translation(format!("Invalid Google Translate URL: {}", e)))?;
        Ok(Self { client, api_key, endpoint })
    }
}

impl fmt::Debug for GoogleTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleTranslator")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslator {
    fn name(&self) -> &str {
        "Google Translate"
    }

    async fn translate(&self, text: &str, target: &str, source: &str) -> Result<Option<String>> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", text),
                ("target", target),
                ("source", source),
                ("format", "text"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<GoogleResponse>()
            .await?;

        Ok(response
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text))
    }
}
