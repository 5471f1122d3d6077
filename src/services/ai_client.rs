//! Client for the text-generation API used for report insights and
//! free-form ledger summaries. Treated as a text-in/text-out
//! collaborator: the report path must keep working when it is
//! unconfigured, slow, or failing.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::models::expense::format_cents;
use crate::models::report::ReportData;
use crate::services::reports::LedgerSnapshot;
use tracing::{debug, warn};

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Shown in place of insights when no API key is configured.
pub const MISSING_KEY_PLACEHOLDER: &str =
    "AI summary could not be generated (Missing API Key).";
/// Shown when the generation call fails for any reason.
pub const UNAVAILABLE_PLACEHOLDER: &str = "AI summary could not be generated at this time.";
/// Shown when the call succeeds but returns no text.
pub const EMPTY_PLACEHOLDER: &str = "No AI summary available.";

const DEFAULT_SUMMARY_PROMPT: &str = "Summarize my current income, categorized expenses, and \
     budgets. List overspending categories and offer savings advice.";

#[derive(Debug, Clone)]
pub struct AiSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl AiSettings {
    pub const DEFAULT_BASE_URL: &'static str =
        "https://generativelanguage.googleapis.com/v1beta";
    pub const DEFAULT_MODEL: &'static str = "gemini-1.5-flash";
}

fn create_client() -> AppResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))
}

/// Insights for a windowed report. Errors propagate; callers that must
/// not fail use [`fetch_insights`] instead.
pub async fn generate_insights(settings: &AiSettings, report: &ReportData) -> AppResult<String> {
    let prompt = build_insights_prompt(report);
    post_generate(settings, &prompt).await
}

/// Degrading wrapper around [`generate_insights`]: a missing
/// configuration or a failed call yields a placeholder string, never an
/// error, so the enclosing report survives.
pub async fn fetch_insights(settings: Option<&AiSettings>, report: &ReportData) -> String {
    let Some(settings) = settings else {
        warn!("AI insights skipped: no API key configured");
        return MISSING_KEY_PLACEHOLDER.to_string();
    };

    match generate_insights(settings, report).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "AI insights call failed");
            UNAVAILABLE_PLACEHOLDER.to_string()
        }
    }
}

/// Free-form summary over the user's whole ledger, with an optional
/// caller-supplied instruction.
pub async fn summarize_ledger(
    settings: &AiSettings,
    snapshot: &LedgerSnapshot,
    description: Option<&str>,
) -> AppResult<String> {
    let description = description.unwrap_or(DEFAULT_SUMMARY_PROMPT);
    let data = serde_json::to_string(snapshot)
        .map_err(|e| AppError::Internal(format!("Failed to serialize ledger: {}", e)))?;
    let prompt = format!("{}\n\nData:\n{}", description, data);
    post_generate(settings, &prompt).await
}

fn build_insights_prompt(report: &ReportData) -> String {
    let data = serde_json::json!({
        "budgets": report.budgets,
        "expenses": report.expenses,
    });
    format!(
        "Summarize the following financial period. Total income was {} and total expenses \
         were {}. Highlight any overspending compared to budgets and provide actionable \
         savings tips. Data: {}",
        format_cents(report.total_income_cents),
        format_cents(report.total_expenses_cents),
        data
    )
}

async fn post_generate(settings: &AiSettings, prompt: &str) -> AppResult<String> {
    #[derive(Serialize)]
    struct Part {
        text: String,
    }

    #[derive(Serialize)]
    struct Content {
        parts: Vec<Part>,
    }

    #[derive(Serialize)]
    struct GenerateRequest {
        contents: Vec<Content>,
    }

    #[derive(Deserialize)]
    struct GenerateResponse {
        #[serde(default)]
        candidates: Vec<Candidate>,
    }

    #[derive(Deserialize)]
    struct Candidate {
        content: Option<CandidateContent>,
    }

    #[derive(Deserialize)]
    struct CandidateContent {
        #[serde(default)]
        parts: Vec<CandidatePart>,
    }

    #[derive(Deserialize)]
    struct CandidatePart {
        text: Option<String>,
    }

    let client = create_client()?;
    let url = format!(
        "{}/models/{}:generateContent?key={}",
        settings.base_url.trim_end_matches('/'),
        settings.model,
        settings.api_key
    );

    let request = GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
    };

    debug!(model = %settings.model, prompt_len = prompt.len(), "Sending generation request");

    let response = client
        .post(&url)
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await
        .map_err(|e| AppError::Internal(format!("Generation request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Internal(format!(
            "Generation API returned {}: {}",
            status, body
        )));
    }

    let parsed: GenerateResponse = response
        .json()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to parse generation response: {}", e)))?;

    let text = parsed
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.first())
        .and_then(|p| p.text.clone())
        .unwrap_or_default();

    if text.is_empty() {
        return Ok(EMPTY_PLACEHOLDER.to_string());
    }
    Ok(text)
}
