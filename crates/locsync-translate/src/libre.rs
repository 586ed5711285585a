use async_trait::async_trait;
use std::time::Duration;

use crate::{TranslateError, Translator};

const DEFAULT_ENDPOINT: &str = "https://libretranslate.com";

/// LibreTranslate instance, self-hosted or the public one. The API key is
/// optional for self-hosted instances.
pub struct LibreTranslator {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl LibreTranslator {
    pub fn new(
        endpoint: Option<String>,
        api_key: Option<String>,
        timeout_ms: u64,
    ) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("locsync/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key,
            client,
        })
    }
}

#[async_trait]
impl Translator for LibreTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        #[derive(serde::Serialize)]
        struct In<'a> {
            q: &'a str,
            source: &'a str,
            target: &'a str,
            format: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            api_key: Option<&'a str>,
        }
        #[derive(serde::Deserialize)]
        struct Out {
            #[serde(rename = "translatedText")]
            translated_text: String,
        }
        #[derive(serde::Deserialize)]
        struct ApiError {
            error: String,
        }

        let url = format!("{}/translate", self.endpoint.trim_end_matches('/'));
        let res = self
            .client
            .post(url)
            .json(&In {
                q: text,
                source,
                target,
                format: "text",
                api_key: self.api_key.as_deref(),
            })
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(TranslateError::Provider {
                status: status.as_u16(),
                message,
            });
        }
        let out: Out = res.json().await?;
        Ok(out.translated_text)
    }

    fn name(&self) -> &'static str {
        "libre"
    }
}
