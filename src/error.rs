use thiserror::Error;

/// Failure talking to the model endpoint. Variants are distinct so the caller
/// can pick its own retry policy; nothing in here retries automatically.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Transport Error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Authentication rejected: {0}")]
    Auth(String),

    #[error("Rate limit or quota exceeded: {0}")]
    Quota(String),

    #[error("Upstream Error {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed upstream response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing template variable: {0}")]
    MissingVariable(String),

    #[error("Model Invocation Error: {0}")]
    Model(#[from] ModelError),

    #[error("Schema Mismatch: reply missing field(s) {missing:?}")]
    SchemaMismatch { missing: Vec<String>, raw: String },

    #[error("Config Error: {0}")]
    Config(String),
}
