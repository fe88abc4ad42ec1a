use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sn_core::{Error, Result, TranslationProvider};
use std::fmt;
use url::Url;

use super::REQUEST_TIMEOUT;

pub const DEFAULT_LIBRETRANSLATE_URL: &str = "https://libretranslate.com";

/// LibreTranslate has no Bosnian model; Croatian is the closest it offers.
/// Codes not listed pass through unchanged.
const LANGUAGE_MAP: &[(&str, &str)] = &[
    ("bs", "hr"),
    ("en", "en"),
    ("es", "es"),
    ("fr", "fr"),
    ("de", "de"),
    ("it", "it"),
    ("pt", "pt"),
    ("ru", "ru"),
];

pub fn libre_language_code(code: &str) -> &str {
    LANGUAGE_MAP
        .iter()
        .find(|(from, _)| *from == code)
        .map(|(_, to)| *to)
        .unwrap_or(code)
}

#[derive(Serialize)]
struct LibreRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct LibreResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// Self-hostable LibreTranslate instance, unauthenticated, JSON body.
pub struct LibreTranslator {
    client: Client,
    base_url: Url,
}

impl LibreTranslator {
    pub fn new(base_url: Option<&str>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url = Url::parse(base_url.unwrap_or(DEFAULT_LIBRETRANSLATE_URL))
            .map_err(|e| Error::Translation(format!("Invalid LibreTranslate URL: {}", e)))?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self) -> String {
        format!("{}/translate", self.base_url.as_str().trim_end_matches('/'))
    }
}

impl fmt::Debug for LibreTranslator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibreTranslator")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslator {
    fn name(&self) -> &str {
        "LibreTranslate"
    }

    async fn translate(&self, text: &str, target: &str, source: &str) -> Result<Option<String>> {
        let request = LibreRequest {
            q: text,
            source: libre_language_code(source),
            target: libre_language_code(target),
            format: "text",
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<LibreResponse>()
            .await?;

        Ok(response.translated_text)
    }
}
