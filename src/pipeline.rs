use serde_json::Value;
use uuid::Uuid;

use crate::ai::client::GeminiClient;
use crate::ai::prompts;
use crate::config::Settings;
use crate::core::parser::ParsedResult;
use crate::core::prompt::{PromptRequest, compose};
use crate::core::schema::{self, RESPONSE_FIELDS};
use crate::error::AppError;

/// Runs one submission end to end: compose -> invoke -> parse. The format
/// instructions and response schema are derived from the field list once at
/// construction and reused for the process lifetime.
pub struct Pipeline {
    client: GeminiClient,
    format_instructions: String,
    response_schema: Value,
}

impl Pipeline {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: GeminiClient::new(settings),
            format_instructions: schema::format_instructions(&RESPONSE_FIELDS),
            response_schema: schema::response_schema(&RESPONSE_FIELDS),
        }
    }

    /// Strictly sequential; any phase error is terminal for this submission.
    pub async fn run(&self, request: PromptRequest) -> Result<ParsedResult, AppError> {
        let submission = Uuid::new_v4();

        log::info!("[{submission}] 📝 Composing prompt (cycle day {}, role {})", request.cycle_day, request.role);
        let prompt = compose(prompts::MESSAGE_TEMPLATE, &request.vars(&self.format_instructions))?;

        log::info!("[{submission}] 🤖 Invoking model");
        let raw = self.client.invoke(&prompt, &self.response_schema).await?;

        log::info!("[{submission}] 🔎 Parsing reply ({} bytes)", raw.len());
        let result = ParsedResult::from_reply(&raw, &RESPONSE_FIELDS)?;

        log::info!("[{submission}] ✅ Submission complete");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_needs_no_ambient_state() {
        // The credential comes from Settings, never from the environment here.
        let settings = Settings {
            api_key: "test-key".into(),
            model: "test-model".into(),
            port: 0,
        };
        let pipeline = Pipeline::new(&settings);
        assert!(pipeline.format_instructions.contains("```json"));
        assert_eq!(pipeline.response_schema["required"].as_array().unwrap().len(), 10);
    }
}
