//! Gemini rescue-plan client.
//!
//! Consumes the already-computed driver records and asks the generative
//! endpoint for a short tactical plan. Strictly decoupled from the
//! calculation engine: any failure here surfaces as an error the caller
//! renders as an advisory string, never into the computed data.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::{DriverCalculated, FleetSummary};

const MODEL: &str = "gemini-2.5-flash";

/// At most this many surplus drivers are named in the request context.
const MAX_HELPERS_IN_CONTEXT: usize = 8;

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

/// Client for the generateContent endpoint
pub struct RescuePlanClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl RescuePlanClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("route-rescue/0.2")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        }
    }

    /// Request a tactical rescue plan for the current fleet state.
    pub async fn generate_plan(
        &self,
        needing_rescue: &[DriverCalculated],
        on_pace: &[DriverCalculated],
        summary: &FleetSummary,
        hours_remaining: f64,
    ) -> Result<String> {
        let prompt = build_prompt(needing_rescue, on_pace, summary, hours_remaining);

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url,
            MODEL,
            urlencoding::encode(&self.api_key)
        );

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await
            .context("Failed to send rescue plan request")?;

        if !response.status().is_success() {
            bail!("Rescue plan service returned {}", response.status());
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse rescue plan response")?;

        let text: String = parsed
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            bail!("Rescue plan service returned an empty plan");
        }

        Ok(text)
    }
}

/// Compact JSON payload describing the fleet state: behind drivers in
/// descending deficit order, plus the strongest helpers first.
pub fn plan_context(
    needing_rescue: &[DriverCalculated],
    on_pace: &[DriverCalculated],
    summary: &FleetSummary,
    hours_remaining: f64,
) -> Value {
    let mut behind: Vec<&DriverCalculated> = needing_rescue.iter().collect();
    behind.sort_by(|a, b| b.diff.cmp(&a.diff));

    let mut helpers: Vec<&DriverCalculated> = on_pace.iter().collect();
    helpers.sort_by(|a, b| a.diff.cmp(&b.diff));

    json!({
        "situation": format!(
            "Logistics rescue planning. {:.2} hours remaining in shift.",
            hours_remaining
        ),
        "summary": summary,
        "driversInTrouble": behind.iter().map(|d| json!({
            "name": d.name,
            "stopsBehind": d.diff,
            "currentPace": d.pace,
            "stopsRemaining": d.remaining,
        })).collect::<Vec<_>>(),
        "topHelpers": helpers.iter().take(MAX_HELPERS_IN_CONTEXT).map(|d| json!({
            "name": d.name,
            "surplusCapacity": d.surplus(),
            "pace": d.pace,
        })).collect::<Vec<_>>(),
    })
}

fn build_prompt(
    needing_rescue: &[DriverCalculated],
    on_pace: &[DriverCalculated],
    summary: &FleetSummary,
    hours_remaining: f64,
) -> String {
    let context = plan_context(needing_rescue, on_pace, summary, hours_remaining);

    format!(
        "You are an expert logistics coordinator AI.\n\
         Analyze the JSON data below describing delivery drivers near the end of a shift.\n\n\
         Data: {}\n\n\
         Your goal: create a concise, tactical rescue plan.\n\
         Guidelines:\n\
         1. Identify the most critical driver (highest stops behind).\n\
         2. Suggest specific swaps: \"Assign [Driver A] to take [X] stops from [Driver B]\". \
         Match high-pace helpers with struggling drivers.\n\
         3. Keep it under 150 words. Use bullet points.\n\
         4. Be direct and action-oriented.\n\
         5. If the deficit is large and helpers are few, warn the dispatcher to call in extra shifts.",
        context
    )
}
