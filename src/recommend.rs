//! Recommendation engine — ranks medicines per disease stage from
//! historical treatment outcomes.
//!
//! The aggregation is a pure function over fetched rows so it can be tested
//! without a database: group by medicine, average the improvement, sort
//! descending, attach a sample-size confidence tier.

use std::cmp::Ordering;
use std::collections::HashMap;

use rusqlite::{params, Connection};
use serde::Serialize;

use crate::db::DatabaseError;

/// One treatment outcome at a given stage, as fetched from storage.
#[derive(Debug, Clone)]
pub struct StageOutcome {
    pub medicine_id: i64,
    pub medicine_name: String,
    pub description: Option<String>,
    pub improvement_percent: f64,
}

/// One ranked medicine for a stage. Serialize-only wire type.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationEntry {
    pub medicine_id: i64,
    pub medicine_name: String,
    pub description: Option<String>,
    /// Mean improvement, rounded to 2 decimal places.
    pub average_improvement: f64,
    pub treatment_count: u32,
    pub confidence_level: &'static str,
}

/// Map exact lowercase stage names to their canonical capitalized form.
///
/// Anything else — including mixed case like "EARLY" — passes through
/// unchanged. The stage filter downstream is an exact match, so unrecognized
/// strings simply select nothing.
pub fn normalize_stage(stage: &str) -> String {
    match stage {
        "early" => "Early".to_string(),
        "middle" => "Middle".to_string(),
        "severe" => "Severe".to_string(),
        other => other.to_string(),
    }
}

/// Confidence tier from sample size backing a recommendation.
pub fn confidence_level(treatment_count: u32) -> &'static str {
    if treatment_count > 10 {
        "High"
    } else if treatment_count > 5 {
        "Moderate"
    } else {
        "Low"
    }
}

/// Group outcomes by medicine and rank by descending average improvement.
///
/// Grouping preserves first-seen order; the sort is stable, so medicines
/// with equal averages keep that order.
pub fn rank(outcomes: &[StageOutcome]) -> Vec<RecommendationEntry> {
    struct Group {
        medicine_name: String,
        description: Option<String>,
        sum: f64,
        count: u32,
    }

    let mut order: Vec<i64> = Vec::new();
    let mut groups: HashMap<i64, Group> = HashMap::new();

    for outcome in outcomes {
        let group = groups.entry(outcome.medicine_id).or_insert_with(|| {
            order.push(outcome.medicine_id);
            Group {
                medicine_name: outcome.medicine_name.clone(),
                description: outcome.description.clone(),
                sum: 0.0,
                count: 0,
            }
        });
        group.sum += outcome.improvement_percent;
        group.count += 1;
    }

    let mut entries: Vec<RecommendationEntry> = order
        .into_iter()
        .filter_map(|medicine_id| {
            let group = groups.remove(&medicine_id)?;
            Some(RecommendationEntry {
                medicine_id,
                medicine_name: group.medicine_name,
                description: group.description,
                average_improvement: round2(group.sum / f64::from(group.count)),
                treatment_count: group.count,
                confidence_level: confidence_level(group.count),
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.average_improvement
            .partial_cmp(&a.average_improvement)
            .unwrap_or(Ordering::Equal)
    });
    entries
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// All treatment outcomes whose patient has exactly the given stage,
/// in insertion order.
pub fn fetch_stage_outcomes(
    conn: &Connection,
    stage: &str,
) -> Result<Vec<StageOutcome>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT m.id, m.name, m.description, t.improvement_percent
         FROM treatments t
         JOIN patients p ON p.id = t.patient_id
         JOIN medicines m ON m.id = t.medicine_id
         WHERE p.disease_stage = ?1
         ORDER BY t.id",
    )?;
    let rows = stmt.query_map(params![stage], |row| {
        Ok(StageOutcome {
            medicine_id: row.get(0)?,
            medicine_name: row.get(1)?,
            description: row.get(2)?,
            improvement_percent: row.get(3)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Ranked recommendation list for a stage. A stage with no matching
/// treatments yields an empty list, not an error.
pub fn recommend(conn: &Connection, stage: &str) -> Result<Vec<RecommendationEntry>, DatabaseError> {
    let outcomes = fetch_stage_outcomes(conn, stage)?;
    Ok(rank(&outcomes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::db::repository::{medicines, patients, treatments};

    fn outcome(medicine_id: i64, name: &str, improvement: f64) -> StageOutcome {
        StageOutcome {
            medicine_id,
            medicine_name: name.to_string(),
            description: None,
            improvement_percent: improvement,
        }
    }

    #[test]
    fn ranking_sorts_by_descending_average() {
        let outcomes = vec![
            outcome(1, "Galantamine", 60.0),
            outcome(2, "Donepezil", 80.0),
            outcome(1, "Galantamine", 70.0),
        ];
        let ranked = rank(&outcomes);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].medicine_name, "Donepezil");
        assert_eq!(ranked[0].average_improvement, 80.0);
        assert_eq!(ranked[1].average_improvement, 65.0);
    }

    #[test]
    fn averages_stay_within_input_range() {
        let outcomes = vec![
            outcome(1, "A", 0.0),
            outcome(1, "A", 100.0),
            outcome(2, "B", 33.333),
        ];
        for entry in rank(&outcomes) {
            assert!(entry.average_improvement >= 0.0);
            assert!(entry.average_improvement <= 100.0);
        }
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        let outcomes = vec![
            outcome(1, "A", 33.333),
            outcome(1, "A", 33.333),
            outcome(1, "A", 33.333),
        ];
        assert_eq!(rank(&outcomes)[0].average_improvement, 33.33);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let outcomes = vec![
            outcome(7, "First", 50.0),
            outcome(3, "Second", 50.0),
            outcome(9, "Third", 50.0),
        ];
        let ranked = rank(&outcomes);
        let names: Vec<&str> = ranked.iter().map(|e| e.medicine_name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn confidence_tier_boundaries_are_exact() {
        assert_eq!(confidence_level(11), "High");
        assert_eq!(confidence_level(10), "Moderate");
        assert_eq!(confidence_level(6), "Moderate");
        assert_eq!(confidence_level(5), "Low");
        assert_eq!(confidence_level(1), "Low");
    }

    #[test]
    fn normalize_maps_exact_lowercase_only() {
        assert_eq!(normalize_stage("early"), "Early");
        assert_eq!(normalize_stage("middle"), "Middle");
        assert_eq!(normalize_stage("severe"), "Severe");
        // Mixed case passes through unchanged — documented quirk
        assert_eq!(normalize_stage("EARLY"), "EARLY");
        assert_eq!(normalize_stage("Early"), "Early");
        assert_eq!(normalize_stage("mild"), "mild");
    }

    #[test]
    fn empty_outcomes_yield_empty_ranking() {
        assert!(rank(&[]).is_empty());
    }

    #[test]
    fn recommend_from_seeded_database() {
        let conn = open_memory_database().unwrap();
        let patient = patients::insert_patient(&conn, "Jane Doe", 72, "Female", "Early").unwrap();
        let donepezil =
            medicines::insert_medicine(&conn, "Donepezil", "Cholinesterase inhibitor", None)
                .unwrap();
        let galantamine =
            medicines::insert_medicine(&conn, "Galantamine", "Cholinesterase inhibitor", None)
                .unwrap();
        treatments::insert_treatment(&conn, patient.id, donepezil.id, 80.0, None).unwrap();
        treatments::insert_treatment(&conn, patient.id, galantamine.id, 60.0, None).unwrap();

        let ranked = recommend(&conn, "Early").unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].medicine_name, "Donepezil");
        assert_eq!(ranked[0].average_improvement, 80.0);
        assert_eq!(ranked[0].treatment_count, 1);
        assert_eq!(ranked[0].confidence_level, "Low");
    }

    #[test]
    fn stage_filter_is_case_sensitive_exact() {
        let conn = open_memory_database().unwrap();
        let patient = patients::insert_patient(&conn, "Jane Doe", 72, "Female", "Early").unwrap();
        let med = medicines::insert_medicine(&conn, "Donepezil", "inhibitor", None).unwrap();
        treatments::insert_treatment(&conn, patient.id, med.id, 80.0, None).unwrap();

        assert_eq!(recommend(&conn, "Early").unwrap().len(), 1);
        assert!(recommend(&conn, "early").unwrap().is_empty());
        assert!(recommend(&conn, "Severe").unwrap().is_empty());
    }
}
