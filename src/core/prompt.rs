use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Host,
    Guest,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Host => write!(f, "host"),
            Role::Guest => write!(f, "guest"),
        }
    }
}

/// One submission's worth of cycle-tracking inputs. Built fresh per request,
/// consumed during composition, never mutated.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub cycle_day: u32,
    pub role: Role,
    pub week_name: String,
    pub hormone_phase: String,
    pub hormone_trends: String,
    pub emotional_cognitive_states: String,
    pub host_name: String,
    pub pronoun: String,
}

impl PromptRequest {
    /// Bindings for every slot in the message template: the eight inputs plus
    /// the rendered format instructions.
    pub fn vars(&self, format_instructions: &str) -> HashMap<&'static str, String> {
        let mut vars = HashMap::new();
        vars.insert("cycle_day", self.cycle_day.to_string());
        vars.insert("role", self.role.to_string());
        vars.insert("week_name", self.week_name.clone());
        vars.insert("hormone_phase", self.hormone_phase.clone());
        vars.insert("hormone_trends", self.hormone_trends.clone());
        vars.insert("emotional_cognitive_states", self.emotional_cognitive_states.clone());
        vars.insert("host_name", self.host_name.clone());
        vars.insert("pronoun", self.pronoun.clone());
        vars.insert("format_instructions", format_instructions.to_string());
        vars
    }
}

/// Fills every `{name}` placeholder in `template` from `vars`.
///
/// Substituted values are inserted verbatim and never re-scanned, so braces
/// inside a value (e.g. the JSON block in the format instructions) are not
/// treated as placeholders. `{{` and `}}` escape to literal braces. A
/// placeholder without a binding fails with `MissingVariable`.
pub fn compose(template: &str, vars: &HashMap<&'static str, String>) -> Result<String, AppError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => name.push(ch),
                        None => return Err(AppError::MissingVariable(name)),
                    }
                }
                match vars.get(name.as_str()) {
                    Some(value) => out.push_str(value),
                    None => return Err(AppError::MissingVariable(name)),
                }
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}
