//! Prompt construction for the report composers.

/// At most this many historical reports are embedded in the prompt.
pub const MAX_HISTORICAL_REPORTS: usize = 5;

/// At most this many current observations are embedded in the prompt.
pub const MAX_CURRENT_OBSERVATIONS: usize = 10;

/// Sentinel used when the patient has no stored treatments.
pub const NO_RECORDS_SENTINEL: &str = "No previous medical records found in database.";

/// Build the progression-analysis prompt.
///
/// Embeds the matched-treatment text block plus at most the first
/// [`MAX_HISTORICAL_REPORTS`] historical reports and
/// [`MAX_CURRENT_OBSERVATIONS`] current observations, in given order, and
/// instructions requesting a fixed-key JSON object.
pub fn build_progression_prompt(
    patient_name: &str,
    stage: &str,
    matched_treatments: &str,
    historical_reports: &[String],
    current_observations: &[String],
) -> String {
    let historical = if historical_reports.is_empty() {
        "No previous reports found.".to_string()
    } else {
        historical_reports[..historical_reports.len().min(MAX_HISTORICAL_REPORTS)].join("\n")
    };
    let observations = if current_observations.is_empty() {
        "No recent observations provided.".to_string()
    } else {
        current_observations[..current_observations.len().min(MAX_CURRENT_OBSERVATIONS)].join("\n")
    };

    format!(
        r#"You are a specialized Neurological AI Medical Assistant.
Patient: {patient_name}
Stage: {stage} Case

{matched_treatments}

HISTORICAL REPORTS (AI-Generated from past memories):
{historical}

RECENT OBSERVATIONS (New memory raw descriptions):
{observations}

TASK:
1. Compare current inputs with any found medical records. If records exist, mention if current observation aligns with past treatment outcomes.
2. Analyze the change in tone, complexity, and content between historical reports and current observations.
3. Identify signs of cognitive stability or decline.
4. Provide 3 specific, non-clinical recommendations for the caregiver to maintain cognitive health (e.g., social activities, specific sensory recall triggers).
5. Suggest a medical focus area for the next doctor's visit.

Format the output as a JSON object with these keys:
{{
    "progression_summary": "string",
    "cognitive_status": "Improving/Stable/Declining",
    "key_findings": ["finding 1", "finding 2"],
    "caregiver_recommendations": ["rec 1", "rec 2", "rec 3"],
    "medical_focus": "string"
}}

Be analytical, compassionate, and precise. Just the JSON.
"#
    )
}

/// Fixed prompt for the aggregate research summary.
pub const RESEARCH_PROMPT: &str = r#"You are a medical researcher.
Provide a structured summary of the CURRENT state of Alzheimer's Disease data (as of 2024/2025).

Format the output purely as a JSON object with these keys:
{
    "global_prevalence": "string",
    "key_statistics": ["string", "string"],
    "recent_breakthroughs": [
        {"title": "string", "summary": "string"}
    ],
    "projected_growth": "string"
}

Keep it concise, professional, and data-driven.
Do not include markdown filtering (```json ... ```), just the raw JSON string.
"#;
