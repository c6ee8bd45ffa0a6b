//! Research-summary composer — stateless sibling of the progression
//! composer: fixed prompt, same degradation chain and lenient extraction,
//! hardcoded snapshot on any failure.

use serde::{Deserialize, Serialize};

use crate::ai::{extract, fallback, TextGenerate};
use crate::reports::prompt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breakthrough {
    pub title: String,
    pub summary: String,
}

/// Aggregate disease statistics, AI-derived or fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchSummary {
    pub global_prevalence: String,
    pub key_statistics: Vec<String>,
    pub recent_breakthroughs: Vec<Breakthrough>,
    pub projected_growth: String,
}

/// Hardcoded snapshot returned when the provider reply is unusable.
fn fallback_summary() -> ResearchSummary {
    ResearchSummary {
        global_prevalence: "Over 55 million people worldwide".to_string(),
        key_statistics: vec![
            "Every 3 seconds, someone develops dementia".to_string(),
            "Alzheimer's contributes to 60-70% of dementia cases".to_string(),
        ],
        recent_breakthroughs: vec![Breakthrough {
            title: "Lecanemab Approval".to_string(),
            summary: "FDA approved new therapy targeting amyloid plaques.".to_string(),
        }],
        projected_growth: "Expected to reach 78 million by 2030".to_string(),
    }
}

/// Compose the research summary. Never errors; provider or parse failure
/// yields the fixed fallback content.
pub fn compose_research_summary(client: &dyn TextGenerate, models: &[String]) -> ResearchSummary {
    let reply = fallback::generate_or_mock(client, models, prompt::RESEARCH_PROMPT);

    extract::extract_json(&reply)
        .and_then(|value| serde_json::from_value::<ResearchSummary>(value).ok())
        .unwrap_or_else(|| {
            tracing::warn!("provider reply not parseable as research summary, using fallback");
            fallback_summary()
        })
}
