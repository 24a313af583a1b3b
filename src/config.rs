use crate::error::AppError;

const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";
const DEFAULT_PORT: u16 = 8080;

/// Process configuration, loaded once at startup and passed explicitly to the
/// pieces that need it. The API key is never read ambiently after this point.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub model: String,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| AppError::Config("GEMINI_API_KEY must be set".into()))?;

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| AppError::Config(format!("invalid PORT value: {raw}")))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self { api_key, model, port })
    }
}
