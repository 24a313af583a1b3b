use serde_json::{Value, json};
use tokio::time::Duration;

use crate::config::Settings;
use crate::error::ModelError;

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        }
    }

    /// One blocking call per submission: sends the composed prompt with
    /// deterministic decoding (temperature 0) and returns the raw reply text.
    /// Failed calls are not retried here; the caller owns retry policy.
    pub async fn invoke(&self, prompt: &str, response_schema: &Value) -> Result<String, ModelError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let payload = build_payload(prompt, response_schema);
        let res = self.client.post(&url).json(&payload).send().await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            log::error!("API Error {status}: {body}");
            return Err(classify_status(status.as_u16(), body));
        }

        let body: Value = res.json().await?;
        let text = body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| ModelError::Malformed("no text content returned".into()))?;

        Ok(text.to_string())
    }
}

fn build_payload(prompt: &str, response_schema: &Value) -> Value {
    json!({
        "contents": [{
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "temperature": 0,
            "responseMimeType": "application/json",
            "responseSchema": response_schema
        }
    })
}

fn classify_status(status: u16, body: String) -> ModelError {
    match status {
        401 | 403 => ModelError::Auth(body),
        429 => ModelError::Quota(body),
        _ => ModelError::Upstream { status, body },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_pins_deterministic_decoding() {
        let schema = json!({ "type": "object" });
        let payload = build_payload("hello", &schema);
        assert_eq!(payload["generationConfig"]["temperature"], 0);
        assert_eq!(payload["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(payload["generationConfig"]["responseSchema"], schema);
        assert_eq!(payload["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn status_codes_map_to_distinct_errors() {
        assert!(matches!(classify_status(401, String::new()), ModelError::Auth(_)));
        assert!(matches!(classify_status(403, String::new()), ModelError::Auth(_)));
        assert!(matches!(classify_status(429, String::new()), ModelError::Quota(_)));
        assert!(matches!(
            classify_status(500, String::new()),
            ModelError::Upstream { status: 500, .. }
        ));
    }
}
