use async_trait::async_trait;
use std::time::Duration;

use crate::{TranslateError, Translator};

const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com";

/// Google's undocumented free endpoint (`client=gtx`). No credentials, but
/// also no guarantees; fine for small tables, rate limits kick in quickly.
pub struct GoogleFreeTranslator {
    endpoint: String,
    client: reqwest::Client,
}

impl GoogleFreeTranslator {
    pub fn new(endpoint: Option<String>, timeout_ms: u64) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("locsync/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            client,
        })
    }
}

#[async_trait]
impl Translator for GoogleFreeTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        let url = format!(
            "{}/translate_a/single",
            self.endpoint.trim_end_matches('/')
        );
        let res = self
            .client
            .get(url)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            return Err(TranslateError::Provider {
                status: status.as_u16(),
                message: res.text().await.unwrap_or_default(),
            });
        }
        let payload: serde_json::Value = res.json().await?;
        join_segments(&payload)
            .ok_or_else(|| TranslateError::UnexpectedResponse(payload.to_string()))
    }

    fn name(&self) -> &'static str {
        "google"
    }
}

/// The gtx payload is a nested array; element 0 holds translation segments,
/// each segment an array whose element 0 is the translated chunk.
fn join_segments(payload: &serde_json::Value) -> Option<String> {
    let segments = payload.get(0)?.as_array()?;
    let mut out = String::new();
    for seg in segments {
        if let Some(chunk) = seg.get(0).and_then(|v| v.as_str()) {
            out.push_str(chunk);
        }
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_multi_segment_payloads() {
        let payload = json!([
            [
                ["Bonjour, ", "Hello, ", null, null],
                ["le monde", "world", null, null]
            ],
            null,
            "en"
        ]);
        assert_eq!(join_segments(&payload).as_deref(), Some("Bonjour, le monde"));
    }

    #[test]
    fn rejects_shapes_without_segments() {
        assert_eq!(join_segments(&json!({"error": "nope"})), None);
        assert_eq!(join_segments(&json!([])), None);
        assert_eq!(join_segments(&json!([[]])), None);
    }
}
