use std::collections::BTreeMap;

use serde_json::Value;

use crate::core::schema::FieldSpec;
use crate::error::AppError;

/// The validated record extracted from a model reply. Holds exactly the
/// declared field names; construction is all-or-nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResult {
    values: BTreeMap<String, String>,
}

impl ParsedResult {
    /// Parses a raw model reply against the declared schema.
    ///
    /// Strips an optional ```json fence, parses the body as a JSON object and
    /// requires every declared field to be present. Any missing field fails
    /// with `SchemaMismatch` carrying all absent names and the raw text; no
    /// partial result is ever returned. Field values are not semantically
    /// validated, only their presence is.
    pub fn from_reply(raw: &str, fields: &[FieldSpec]) -> Result<Self, AppError> {
        let cleaned = clean_json_block(raw);

        let all_missing = || AppError::SchemaMismatch {
            missing: fields.iter().map(|f| f.name.to_string()).collect(),
            raw: raw.to_string(),
        };

        let body: Value = serde_json::from_str(&cleaned).map_err(|_| all_missing())?;
        let Some(object) = body.as_object() else {
            return Err(all_missing());
        };

        let mut values = BTreeMap::new();
        let mut missing = Vec::new();
        for field in fields {
            match object.get(field.name) {
                Some(value) => {
                    values.insert(field.name.to_string(), render_value(value));
                }
                None => missing.push(field.name.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(AppError::SchemaMismatch { missing, raw: raw.to_string() });
        }

        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Strings pass through as-is; other scalars render naturally; structural
/// values fall back to compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn clean_json_block(text: &str) -> String {
    let start = text.find("```json").map(|i| i + 7).unwrap_or(0);
    let end = text.rfind("```").filter(|&i| i >= start).unwrap_or(text.len());
    text[start..end].trim().to_string()
}
