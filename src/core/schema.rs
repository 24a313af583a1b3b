use serde_json::{Value, json};

/// A declared field the model's reply must contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// The fixed response schema. Declared once; immutable for the process lifetime.
pub const RESPONSE_FIELDS: [FieldSpec; 10] = [
    FieldSpec { name: "week_name", description: "The week name based on cycle" },
    FieldSpec { name: "cycle_day", description: "Current cycle day number" },
    FieldSpec { name: "role", description: "The role of the user, either 'host' or 'guest'" },
    FieldSpec { name: "pronouns", description: "Pronouns used by the user" },
    FieldSpec { name: "host_name", description: "Name of host" },
    FieldSpec { name: "Today's Insight", description: "A personalized supportive message" },
    FieldSpec { name: "DO", description: "Suggested activities to do" },
    FieldSpec { name: "EAT", description: "Suggested foods to eat" },
    FieldSpec { name: "MOVE", description: "Suggested physical movements" },
    FieldSpec { name: "SEX", description: "Suggested intimacy tips" },
];

/// Renders the instruction block embedded in every prompt, telling the model to
/// answer as a JSON object with exactly the declared keys. Pure function of the
/// field list; the pipeline computes it once and reuses it.
pub fn format_instructions(fields: &[FieldSpec]) -> String {
    let mut lines = String::new();
    for field in fields {
        lines.push_str(&format!("\t\"{}\": string  // {}\n", field.name, field.description));
    }
    format!(
        "The output should be a markdown code snippet formatted in the following schema, \
         including the leading and trailing \"```json\" and \"```\":\n\n```json\n{{\n{lines}}}\n```"
    )
}

/// JSON schema for the model API's structured-output mode, derived from the same
/// field list as the textual instructions.
pub fn response_schema(fields: &[FieldSpec]) -> Value {
    let mut properties = serde_json::Map::new();
    for field in fields {
        properties.insert(
            field.name.to_string(),
            json!({ "type": "string", "description": field.description }),
        );
    }
    let required: Vec<&str> = fields.iter().map(|f| f.name).collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}
