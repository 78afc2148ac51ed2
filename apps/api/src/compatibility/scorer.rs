//! Compatibility scoring — compares a job's required skills with a candidate's skills.
//!
//! Default: `SkillOverlapScorer`, a deterministic heuristic over normalized skill
//! lists. "Experience alignment" and "cultural fit" are fixed derivations of the
//! skills match, not independent signals.
//!
//! `AppState` holds an `Arc<dyn CompatibilityScorer>` so another backend can be
//! swapped in at startup without touching handlers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

const EXPERIENCE_PENALTY: u32 = 10;
const CULTURE_BASELINE: u32 = 50;
const CULTURE_BONUS: u32 = 30;
const CULTURE_BONUS_THRESHOLD: u32 = 80;

const SKILLS_WEIGHT: f64 = 0.6;
const EXPERIENCE_WEIGHT: f64 = 0.2;
const CULTURE_WEIGHT: f64 = 0.2;

const INSUFFICIENT_DATA_INSIGHT: &str = "Insufficient data to perform compatibility analysis.";
const INSUFFICIENT_DATA_VERDICT: &str =
    "Please ensure your profile is complete with skills and the job has required skills listed.";

const ALL_SKILLS_INSIGHT: &str =
    "The candidate possesses all the primary skills matched for this role.";
const LOW_SKILLS_INSIGHT: &str =
    "There is a significant gap between the listed skills and the technical stack required.";
const HIGH_SKILLS_INSIGHT: &str =
    "The profile indicates a strong technical alignment with the role requirements.";
const MID_SKILLS_INSIGHT: &str =
    "The profile shows potential, though some key technical areas may need development.";
const CULTURE_INSIGHT: &str =
    "Cultural fit analysis suggests a balanced alignment with typical team dynamics for this role.";

const EXCELLENT_VERDICT: &str =
    "Excellent candidate! Your profile strongly matches the requirements. We highly recommend applying.";
const GOOD_VERDICT: &str = "Good match. You meet many requirements, but highlighting relevant projects or gaining experience in missing skills could boost your chances.";

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub skills_match: u32,
    pub experience: u32,
    pub culture: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_percent: u32,
    pub breakdown: ScoreBreakdown,
    pub insights: Vec<String>,
    pub verdict: String,
}

impl AnalysisResult {
    /// Result returned when either skill list is absent.
    pub fn insufficient_data() -> Self {
        AnalysisResult {
            overall_percent: 0,
            breakdown: ScoreBreakdown {
                skills_match: 0,
                experience: 0,
                culture: 0,
            },
            insights: vec![INSUFFICIENT_DATA_INSIGHT.to_string()],
            verdict: INSUFFICIENT_DATA_VERDICT.to_string(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to replace the scoring backend. Implementations must be pure:
/// identical inputs yield identical results.
pub trait CompatibilityScorer: Send + Sync {
    fn analyze(&self, required: Option<&[String]>, candidate: Option<&[String]>) -> AnalysisResult;
}

/// Exact-match skill overlap scorer. No fuzzy matching, no synonyms.
pub struct SkillOverlapScorer;

impl CompatibilityScorer for SkillOverlapScorer {
    fn analyze(&self, required: Option<&[String]>, candidate: Option<&[String]>) -> AnalysisResult {
        analyze_compatibility(required, candidate)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Trims surrounding whitespace (including a byte-order mark) and lowercases.
pub fn normalize_skill(skill: &str) -> String {
    skill
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_lowercase()
}

fn analyze_compatibility(
    required: Option<&[String]>,
    candidate: Option<&[String]>,
) -> AnalysisResult {
    let (Some(required), Some(candidate)) = (required, candidate) else {
        return AnalysisResult::insufficient_data();
    };

    let job_skills: Vec<String> = required.iter().map(|s| normalize_skill(s)).collect();
    let user_skills: HashSet<String> = candidate.iter().map(|s| normalize_skill(s)).collect();

    // Duplicated requirements count once per occurrence.
    let missing: Vec<&str> = job_skills
        .iter()
        .filter(|s| !user_skills.contains(*s))
        .map(String::as_str)
        .collect();
    let matching_count = job_skills.len() - missing.len();

    let skills_match = if job_skills.is_empty() {
        100
    } else {
        ((matching_count as f64 / job_skills.len() as f64) * 100.0).round() as u32
    };

    let experience = skills_match.saturating_sub(EXPERIENCE_PENALTY);

    let culture = if skills_match > CULTURE_BONUS_THRESHOLD {
        CULTURE_BASELINE + CULTURE_BONUS
    } else {
        CULTURE_BASELINE
    };

    let overall_percent = (skills_match as f64 * SKILLS_WEIGHT
        + experience as f64 * EXPERIENCE_WEIGHT
        + culture as f64 * CULTURE_WEIGHT)
        .round() as u32;

    AnalysisResult {
        overall_percent,
        breakdown: ScoreBreakdown {
            skills_match,
            experience,
            culture,
        },
        insights: build_insights(skills_match, &missing),
        verdict: build_verdict(overall_percent, &missing),
    }
}

fn build_insights(skills_match: u32, missing: &[&str]) -> Vec<String> {
    let mut insights = Vec::with_capacity(3);

    if missing.is_empty() {
        insights.push(ALL_SKILLS_INSIGHT.to_string());
    } else {
        insights.push(format!(
            "The candidate matches {skills_match}% of required skills but is missing: {}.",
            capitalized_list(missing, 3, ", ")
        ));
    }

    let stack_insight = if skills_match < 50 {
        LOW_SKILLS_INSIGHT
    } else if skills_match >= 80 {
        HIGH_SKILLS_INSIGHT
    } else {
        MID_SKILLS_INSIGHT
    };
    insights.push(stack_insight.to_string());

    insights.push(CULTURE_INSIGHT.to_string());
    insights
}

fn build_verdict(overall: u32, missing: &[&str]) -> String {
    if overall >= 80 {
        EXCELLENT_VERDICT.to_string()
    } else if overall >= 50 {
        GOOD_VERDICT.to_string()
    } else {
        let named = capitalized_list(missing, 2, " and ");
        let focus = if named.is_empty() {
            "required skills"
        } else {
            named.as_str()
        };
        format!(
            "Enhance your resume by adding specific examples or certifications in {focus} to better reflect your level of expertise."
        )
    }
}

fn capitalized_list(skills: &[&str], limit: usize, separator: &str) -> String {
    skills
        .iter()
        .take(limit)
        .map(|s| capitalize(s))
        .collect::<Vec<_>>()
        .join(separator)
}

fn capitalize(skill: &str) -> String {
    let mut chars = skill.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn analyze(required: &[&str], candidate: &[&str]) -> AnalysisResult {
        let required = skills(required);
        let candidate = skills(candidate);
        SkillOverlapScorer.analyze(Some(required.as_slice()), Some(candidate.as_slice()))
    }

    #[test]
    fn test_partial_overlap_scenario() {
        let result = analyze(&["React", "Node", "CSS"], &["react", "css"]);
        assert_eq!(result.breakdown.skills_match, 67);
        assert_eq!(result.breakdown.experience, 57);
        assert_eq!(result.breakdown.culture, 50);
        assert_eq!(result.overall_percent, 62);
        assert_eq!(
            result.insights[0],
            "The candidate matches 67% of required skills but is missing: Node."
        );
        assert_eq!(result.insights[1], MID_SKILLS_INSIGHT);
        assert_eq!(result.verdict, GOOD_VERDICT);
    }

    #[test]
    fn test_no_requirements_is_full_match() {
        let result = analyze(&[], &["Go"]);
        assert_eq!(result.breakdown.skills_match, 100);
        assert_eq!(result.breakdown.experience, 90);
        assert_eq!(result.breakdown.culture, 80);
        assert_eq!(result.overall_percent, 94);
        assert_eq!(result.insights[0], ALL_SKILLS_INSIGHT);
        assert_eq!(result.insights[1], HIGH_SKILLS_INSIGHT);
        assert_eq!(result.verdict, EXCELLENT_VERDICT);
    }

    #[test]
    fn test_empty_candidate_names_missing_skill_in_verdict() {
        let result = analyze(&["Rust"], &[]);
        assert_eq!(result.breakdown.skills_match, 0);
        assert_eq!(result.breakdown.experience, 0);
        assert_eq!(result.breakdown.culture, 50);
        assert_eq!(result.overall_percent, 10);
        assert_eq!(result.insights[1], LOW_SKILLS_INSIGHT);
        assert_eq!(
            result.verdict,
            "Enhance your resume by adding specific examples or certifications in Rust to better reflect your level of expertise."
        );
    }

    #[test]
    fn test_absent_input_returns_insufficient_data() {
        let required = skills(&["Rust"]);
        let scorer = SkillOverlapScorer;

        for result in [
            scorer.analyze(None, Some(required.as_slice())),
            scorer.analyze(Some(required.as_slice()), None),
            scorer.analyze(None, None),
        ] {
            assert_eq!(result, AnalysisResult::insufficient_data());
            assert_eq!(result.overall_percent, 0);
            assert_eq!(result.breakdown.culture, 0);
            assert_eq!(result.insights, vec![INSUFFICIENT_DATA_INSIGHT.to_string()]);
        }
    }

    #[test]
    fn test_normalization_trims_and_lowercases() {
        let result = analyze(&["  TypeScript ", "Docker"], &["typescript", " DOCKER"]);
        assert_eq!(result.breakdown.skills_match, 100);
        assert_eq!(result.insights[0], ALL_SKILLS_INSIGHT);
    }

    #[test]
    fn test_normalization_strips_byte_order_mark() {
        assert_eq!(normalize_skill("\u{feff}Kubernetes\u{a0}"), "kubernetes");

        let result = analyze(&["\u{feff}Kubernetes"], &["kubernetes"]);
        assert_eq!(result.breakdown.skills_match, 100);
    }

    #[test]
    fn test_no_fuzzy_matching() {
        let result = analyze(&["Node.js"], &["Node"]);
        assert_eq!(result.breakdown.skills_match, 0);
    }

    #[test]
    fn test_missing_skills_capped_at_three_and_capitalized() {
        let result = analyze(&["kafka", "redis", "go", "terraform"], &[]);
        assert_eq!(
            result.insights[0],
            "The candidate matches 0% of required skills but is missing: Kafka, Redis, Go."
        );
        assert!(result.verdict.contains("Kafka and Redis"));
        assert!(!result.verdict.contains("Go"));
    }

    #[test]
    fn test_low_verdict_without_missing_skills_falls_back() {
        assert_eq!(
            build_verdict(30, &[]),
            "Enhance your resume by adding specific examples or certifications in required skills to better reflect your level of expertise."
        );
    }

    #[test]
    fn test_culture_bonus_requires_strictly_above_80() {
        // 4 of 5 → exactly 80: no bonus
        let result = analyze(&["a", "b", "c", "d", "e"], &["a", "b", "c", "d"]);
        assert_eq!(result.breakdown.skills_match, 80);
        assert_eq!(result.breakdown.culture, 50);
        assert_eq!(result.insights[1], HIGH_SKILLS_INSIGHT);
    }

    #[test]
    fn test_duplicate_requirements_count_per_occurrence() {
        let result = analyze(&["react", "React", "css"], &["react"]);
        assert_eq!(result.breakdown.skills_match, 67);
        assert_eq!(
            result.insights[0],
            "The candidate matches 67% of required skills but is missing: Css."
        );
    }

    #[test]
    fn test_invariants_hold_across_inputs() {
        let pool = ["rust", "go", "react", "sql", "css", "docker"];
        for required_len in 0..=pool.len() {
            for candidate_len in 0..=pool.len() {
                let required: Vec<&str> = pool.iter().take(required_len).copied().collect();
                let candidate: Vec<&str> = pool.iter().rev().take(candidate_len).copied().collect();
                let result = analyze(&required, &candidate);
                let b = &result.breakdown;

                assert!(b.skills_match <= 100);
                assert_eq!(b.experience, b.skills_match.saturating_sub(10));
                assert!(b.culture == 50 || b.culture == 80);
                assert!(result.overall_percent <= 100);
                assert_eq!(result.insights.len(), 3);
                if required.is_empty() {
                    assert_eq!(b.skills_match, 100);
                }
                if candidate.is_empty() && !required.is_empty() {
                    assert_eq!(b.skills_match, 0);
                }
            }
        }
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let first = analyze(&["React", "Node", "CSS"], &["react", "css"]);
        let second = analyze(&["React", "Node", "CSS"], &["react", "css"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_uses_contract_field_names() {
        let json = serde_json::to_value(analyze(&["Rust"], &["rust"])).unwrap();
        assert_eq!(json["overallPercent"], 94);
        assert_eq!(json["breakdown"]["skillsMatch"], 100);
        assert_eq!(json["breakdown"]["experience"], 90);
        assert_eq!(json["breakdown"]["culture"], 80);
        assert!(json["insights"].is_array());
        assert!(json["verdict"].is_string());
    }
}
