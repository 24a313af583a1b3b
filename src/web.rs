//! Single-page form UI: collects the cycle-tracking inputs, runs the pipeline
//! once per submission and renders the parsed result (or the failure) back.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::core::parser::ParsedResult;
use crate::core::prompt::{PromptRequest, Role};
use crate::core::schema::RESPONSE_FIELDS;
use crate::error::AppError;
use crate::pipeline::Pipeline;

/// Form body for POST /generate. Field defaults mirror the rendered form so a
/// sparse submission still deserializes.
#[derive(Debug, Deserialize)]
pub struct SubmissionForm {
    #[serde(default = "default_cycle_day")]
    cycle_day: u32,
    role: Role,
    #[serde(default = "default_week_name")]
    week_name: String,
    #[serde(default = "default_hormone_phase")]
    hormone_phase: String,
    #[serde(default = "default_hormone_trends")]
    hormone_trends: String,
    #[serde(default = "default_states")]
    emotional_cognitive_states: String,
    #[serde(default)]
    host_name: String,
    #[serde(default = "default_pronoun")]
    pronoun: String,
}

fn default_cycle_day() -> u32 {
    14
}
fn default_week_name() -> String {
    "Power Week".into()
}
fn default_hormone_phase() -> String {
    "Ovulatory".into()
}
fn default_hormone_trends() -> String {
    "Estrogen peak".into()
}
fn default_states() -> String {
    "confident, social, energized".into()
}
fn default_pronoun() -> String {
    "she/her".into()
}

impl SubmissionForm {
    /// Range validation happens here, before the pipeline is entered. An
    /// out-of-range cycle day never reaches composition.
    fn into_request(self) -> Result<PromptRequest, String> {
        if !(1..=50).contains(&self.cycle_day) {
            return Err(format!("Cycle Day must be between 1 and 50 (got {})", self.cycle_day));
        }
        Ok(PromptRequest {
            cycle_day: self.cycle_day,
            role: self.role,
            week_name: self.week_name,
            hormone_phase: self.hormone_phase,
            hormone_trends: self.hormone_trends,
            emotional_cognitive_states: self.emotional_cognitive_states,
            host_name: self.host_name,
            pronoun: self.pronoun,
        })
    }
}

pub fn build_router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .with_state(pipeline)
}

pub async fn serve(pipeline: Arc<Pipeline>, port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, build_router(pipeline)).await
}

/// GET / — the input form with its defaults.
async fn index() -> Html<String> {
    Html(render_page(&render_form()))
}

/// POST /generate — one full pipeline run.
///
/// 422 for inputs rejected before the pipeline, 502 when the model endpoint
/// fails, 500 for everything else. Never renders a partial result.
async fn generate(State(pipeline): State<Arc<Pipeline>>, Form(form): Form<SubmissionForm>) -> Response {
    let request = match form.into_request() {
        Ok(request) => request,
        Err(reason) => {
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(render_page(&render_error(&reason))))
                .into_response();
        }
    };

    match pipeline.run(request).await {
        Ok(result) => Html(render_page(&render_result(&result))).into_response(),
        Err(err) => {
            log::error!("❌ Submission failed: {err}");
            let status = match err {
                AppError::Model(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Html(render_page(&render_error(&err.to_string())))).into_response()
        }
    }
}

fn render_page(body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Cycle Supportive Message Generator</title>\n</head>\n<body>\n\
         <h1>Cycle Supportive Message Generator</h1>\n{body}\n</body>\n</html>"
    )
}

fn render_form() -> String {
    r#"<form method="post" action="/generate">
  <label>Cycle Day <input type="number" name="cycle_day" min="1" max="50" value="14"></label><br>
  <label>Role <select name="role">
    <option value="host">host</option>
    <option value="guest">guest</option>
  </select></label><br>
  <label>Week Name <input type="text" name="week_name" value="Power Week"></label><br>
  <label>Hormone Phase <input type="text" name="hormone_phase" value="Ovulatory"></label><br>
  <label>Hormone Trends <input type="text" name="hormone_trends" value="Estrogen peak"></label><br>
  <label>Emotional &amp; Cognitive States <textarea name="emotional_cognitive_states">confident, social, energized</textarea></label><br>
  <label>Host Name <input type="text" name="host_name" value=""></label><br>
  <label>Pronouns <input type="text" name="pronoun" value="she/her"></label><br>
  <button type="submit">Generate Message</button>
</form>"#
        .to_string()
}

/// Renders the parsed mapping as a labeled key-value block, in schema order,
/// values untransformed apart from HTML escaping.
fn render_result(result: &ParsedResult) -> String {
    let mut rows = String::new();
    for field in &RESPONSE_FIELDS {
        let value = result.get(field.name).unwrap_or_default();
        rows.push_str(&format!(
            "  <dt>{}</dt><dd>{}</dd>\n",
            escape(field.name),
            escape(value)
        ));
    }
    format!("<h2>Generated Supportive Message</h2>\n<dl>\n{rows}</dl>")
}

fn render_error(reason: &str) -> String {
    format!("<h2>Generation failed</h2>\n<p>{}</p>", escape(reason))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(cycle_day: u32) -> SubmissionForm {
        SubmissionForm {
            cycle_day,
            role: Role::Host,
            week_name: default_week_name(),
            hormone_phase: default_hormone_phase(),
            hormone_trends: default_hormone_trends(),
            emotional_cognitive_states: default_states(),
            host_name: String::new(),
            pronoun: default_pronoun(),
        }
    }

    #[test]
    fn cycle_day_bounds_are_enforced_before_the_pipeline() {
        assert!(form(0).into_request().is_err());
        assert!(form(51).into_request().is_err());
        assert!(form(1).into_request().is_ok());
        assert!(form(50).into_request().is_ok());
    }

    #[test]
    fn valid_form_carries_values_through() {
        let request = form(14).into_request().unwrap();
        assert_eq!(request.cycle_day, 14);
        assert_eq!(request.role, Role::Host);
        assert_eq!(request.week_name, "Power Week");
    }

    #[test]
    fn form_defaults_match_the_rendered_page() {
        let html = render_form();
        assert!(html.contains("value=\"14\""));
        assert!(html.contains("value=\"Power Week\""));
        assert!(html.contains("value=\"she/her\""));
        assert!(html.contains("Generate Message"));
        assert_eq!(default_cycle_day(), 14);
    }

    #[test]
    fn result_block_is_titled_and_ordered() {
        let reply = serde_json::json!({
            "week_name": "Power Week",
            "cycle_day": "14",
            "role": "host",
            "pronouns": "she/her",
            "host_name": "",
            "Today's Insight": "<b>peak</b> day",
            "DO": "socialize",
            "EAT": "greens",
            "MOVE": "run",
            "SEX": "connect",
        });
        let result =
            ParsedResult::from_reply(&reply.to_string(), &RESPONSE_FIELDS).unwrap();
        let html = render_result(&result);

        assert!(html.contains("Generated Supportive Message"));
        assert!(html.contains("&lt;b&gt;peak&lt;/b&gt; day"), "values must be HTML-escaped");
        let week = html.find("week_name").unwrap();
        let sex = html.find("SEX").unwrap();
        assert!(week < sex, "fields must render in schema order");
    }

    #[test]
    fn error_block_never_shows_partial_results() {
        let html = render_error("Schema Mismatch: reply missing field(s) [\"DO\"]");
        assert!(html.contains("Generation failed"));
        assert!(!html.contains("Generated Supportive Message"));
    }
}
