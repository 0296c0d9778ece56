//! Keyword ATS scorer — tiered keyword overlap between a resume and a job description.
//!
//! Default backend: `KeywordScorer` (pure-Rust, deterministic, no I/O).
//!
//! `AppState` holds an `Arc<dyn AtsScorer>` so the backend can be swapped at startup.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::ats::stemmer::KeywordStemmer;
use crate::ats::tokenizer::Tokenizer;
use crate::models::resume::ResumeTextSections;
use crate::sanitize::truncate_chars;

/// Upper bound on characters read from any single input string.
pub const MAX_INPUT_CHARS: usize = 50_000;

const SKILLS_WEIGHT: u32 = 3;
const EXPERIENCE_WEIGHT: u32 = 2;
const OTHER_WEIGHT: u32 = 1;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Score plus the job-description keywords found and not found in the resume.
///
/// Both lists hold the first surface form seen in the job description for each
/// stem, in job-description order. Together they cover every job-description stem
/// exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAtsResult {
    pub score: u32, // 0 – 100
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    #[serde(skip)]
    weighted_score: u32,
    #[serde(skip)]
    max_possible_score: u32,
}

impl KeywordAtsResult {
    pub fn empty() -> Self {
        Self {
            score: 0,
            matched_keywords: vec![],
            missing_keywords: vec![],
            weighted_score: 0,
            max_possible_score: 0,
        }
    }

    /// Sum of tier weights earned by matched stems.
    pub fn weighted_score(&self) -> u32 {
        self.weighted_score
    }

    /// Three points per distinct job-description stem.
    pub fn max_possible_score(&self) -> u32 {
        self.max_possible_score
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtsError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Keyword analysis failed: {0}")]
    Internal(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The ATS scorer trait. Implement this to swap backends without touching
/// the handlers.
pub trait AtsScorer: Send + Sync {
    fn score(
        &self,
        sections: &ResumeTextSections,
        job_description: &str,
    ) -> Result<KeywordAtsResult, AtsError>;

    /// Short label for logs, e.g. "keyword".
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordScorer
// ────────────────────────────────────────────────────────────────────────────

/// Tiered keyword matcher.
///
/// Algorithm:
/// 1. Tokenize + stem the JD into an ordered stem set, remembering the first
///    token seen for each stem.
/// 2. Tokenize + stem each resume section into its own stem set.
/// 3. Per JD stem, first hit wins: skills → 3, experience → 2, other → 1, else missing.
/// 4. score = round(weighted / (|JD stems| × 3) × 100), clamped to 0–100.
#[derive(Default)]
pub struct KeywordScorer {
    tokenizer: Tokenizer,
    stemmer: KeywordStemmer,
}

impl KeywordScorer {
    pub fn new() -> Self {
        Self::default()
    }

    fn stem_set(&self, text: &str) -> HashSet<String> {
        self.tokenizer
            .tokenize(truncate_chars(text, MAX_INPUT_CHARS))
            .iter()
            .map(|token| self.stemmer.stem(token))
            .collect()
    }

    fn compute(&self, sections: &ResumeTextSections, job_description: &str) -> KeywordAtsResult {
        let jd_tokens = self
            .tokenizer
            .tokenize(truncate_chars(job_description, MAX_INPUT_CHARS));

        // stem -> first surface token, plus stems in first-seen order
        let mut original_forms: HashMap<String, String> = HashMap::new();
        let mut jd_stems: Vec<String> = Vec::new();
        for token in jd_tokens {
            let stem = self.stemmer.stem(&token);
            if !original_forms.contains_key(&stem) {
                jd_stems.push(stem.clone());
                original_forms.insert(stem, token);
            }
        }

        if jd_stems.is_empty() {
            return KeywordAtsResult::empty();
        }

        let skills = self.stem_set(&sections.skills);
        let experience = self.stem_set(&sections.experience);
        let other = self.stem_set(&sections.other);

        let mut weighted_score = 0_u32;
        let mut matched_keywords = Vec::new();
        let mut missing_keywords = Vec::new();

        for stem in &jd_stems {
            let weight = if skills.contains(stem) {
                SKILLS_WEIGHT
            } else if experience.contains(stem) {
                EXPERIENCE_WEIGHT
            } else if other.contains(stem) {
                OTHER_WEIGHT
            } else {
                0
            };

            let keyword = original_forms
                .get(stem)
                .cloned()
                .unwrap_or_else(|| stem.clone());

            if weight > 0 {
                weighted_score += weight;
                matched_keywords.push(keyword);
            } else {
                missing_keywords.push(keyword);
            }
        }

        let max_possible_score = jd_stems.len() as u32 * SKILLS_WEIGHT;
        let score = normalize_score(weighted_score, max_possible_score);

        debug!(
            jd_stems = jd_stems.len(),
            matched = matched_keywords.len(),
            weighted_score,
            score,
            "Keyword ATS score computed"
        );

        KeywordAtsResult {
            score,
            matched_keywords,
            missing_keywords,
            weighted_score,
            max_possible_score,
        }
    }
}

impl AtsScorer for KeywordScorer {
    fn score(
        &self,
        sections: &ResumeTextSections,
        job_description: &str,
    ) -> Result<KeywordAtsResult, AtsError> {
        if job_description.trim().is_empty() {
            return Err(AtsError::InvalidInput(
                "Job description is required for keyword analysis.".to_string(),
            ));
        }

        guarded(|| self.compute(sections, job_description))
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

/// Scores a resume against a job description with a freshly built `KeywordScorer`.
pub fn score_resume_with_keywords(
    sections: &ResumeTextSections,
    job_description: &str,
) -> Result<KeywordAtsResult, AtsError> {
    KeywordScorer::new().score(sections, job_description)
}

/// Runs `f`, turning a panic into `AtsError::Internal`.
fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, AtsError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        error!("Keyword scorer fault: {message}");
        AtsError::Internal(message)
    })
}

fn normalize_score(weighted_score: u32, max_possible_score: u32) -> u32 {
    if max_possible_score == 0 {
        return 0;
    }
    let normalized = weighted_score as f64 / max_possible_score as f64 * 100.0;
    normalized.round().clamp(0.0, 100.0) as u32
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "An internal error occurred during keyword analysis.".to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(skills: &str, experience: &str, other: &str) -> ResumeTextSections {
        ResumeTextSections::new(skills, experience, other)
    }

    fn score(sections: &ResumeTextSections, jd: &str) -> KeywordAtsResult {
        KeywordScorer::new().score(sections, jd).unwrap()
    }

    #[test]
    fn test_full_skills_match_scores_100() {
        let report = score(&sections("python java sql", "", ""), "python java sql");
        assert_eq!(report.score, 100);
        assert_eq!(report.matched_keywords, vec!["python", "java", "sql"]);
        assert!(report.missing_keywords.is_empty());
    }

    #[test]
    fn test_partial_tiered_match() {
        let report = score(&sections("python", "java project", ""), "python java sql");
        assert_eq!(report.weighted_score(), 5);
        assert_eq!(report.max_possible_score(), 9);
        assert_eq!(report.score, 56);
        assert_eq!(report.matched_keywords, vec!["python", "java"]);
        assert_eq!(report.missing_keywords, vec!["sql"]);
    }

    #[test]
    fn test_no_resume_content_scores_zero() {
        let report = score(&sections("", "", ""), "python backend development");
        assert_eq!(report.score, 0);
        assert!(report.matched_keywords.is_empty());
        assert_eq!(
            report.missing_keywords,
            vec!["python", "backend", "development"]
        );
    }

    #[test]
    fn test_stopword_only_jd_is_zero_result_not_error() {
        let report = score(&sections("python", "", ""), "the and of");
        assert_eq!(report, KeywordAtsResult::empty());
    }

    #[test]
    fn test_symbol_only_jd_is_zero_result() {
        let report = score(&sections("python", "", ""), "C++ 10+ $$$ 2024");
        assert_eq!(report.score, 0);
        assert!(report.matched_keywords.is_empty());
        assert!(report.missing_keywords.is_empty());
    }

    #[test]
    fn test_empty_jd_is_invalid_input() {
        let err = KeywordScorer::new()
            .score(&sections("python", "", ""), "")
            .unwrap_err();
        assert!(matches!(err, AtsError::InvalidInput(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_whitespace_jd_is_invalid_input() {
        let err = score_resume_with_keywords(&sections("", "", ""), "  \n\t").unwrap_err();
        assert!(matches!(err, AtsError::InvalidInput(_)));
    }

    #[test]
    fn test_tier_ordering_for_single_keyword() {
        let jd = "kubernetes";
        let in_skills = score(&sections("kubernetes", "", ""), jd).score;
        let in_experience = score(&sections("", "kubernetes", ""), jd).score;
        let in_other = score(&sections("", "", "kubernetes"), jd).score;
        assert_eq!((in_skills, in_experience, in_other), (100, 67, 33));
        assert!(in_skills >= in_experience && in_experience >= in_other);
    }

    #[test]
    fn test_first_matching_tier_wins() {
        // present in every tier: only the skills weight counts
        let report = score(&sections("rust", "rust", "rust"), "rust");
        assert_eq!(report.weighted_score(), 3);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_inflected_forms_match_via_stems() {
        let report = score(
            &sections("", "Developed deployment tooling", ""),
            "developing deployments",
        );
        assert_eq!(report.matched_keywords, vec!["developing", "deployments"]);
        assert_eq!(report.score, 67);
    }

    #[test]
    fn test_first_seen_surface_form_is_reported() {
        let report = score(&sections("", "", ""), "Engineering engineers engineer");
        assert_eq!(report.missing_keywords, vec!["engineering"]);
    }

    #[test]
    fn test_keyword_lists_have_no_duplicates() {
        let report = score(
            &sections("rust", "", ""),
            "rust rust kafka kafka rust kafka",
        );
        assert_eq!(report.matched_keywords, vec!["rust"]);
        assert_eq!(report.missing_keywords, vec!["kafka"]);
    }

    #[test]
    fn test_matched_and_missing_partition_jd_stems() {
        let jd = "Senior backend engineer: Rust, Kafka, distributed systems, \
                  observability and on-call ownership of production services.";
        let resume = sections(
            "rust, postgres",
            "Ran distributed services in production",
            "Talks on observability",
        );
        let report = score(&resume, jd);

        let tokenizer = Tokenizer::new();
        let stemmer = KeywordStemmer::new();
        let jd_stems: HashSet<String> = tokenizer
            .tokenize(jd)
            .iter()
            .map(|t| stemmer.stem(t))
            .collect();
        let matched: HashSet<String> = report
            .matched_keywords
            .iter()
            .map(|k| stemmer.stem(k))
            .collect();
        let missing: HashSet<String> = report
            .missing_keywords
            .iter()
            .map(|k| stemmer.stem(k))
            .collect();

        assert!(matched.is_disjoint(&missing));
        assert_eq!(&matched | &missing, jd_stems);
        assert_eq!(
            report.matched_keywords.len() + report.missing_keywords.len(),
            jd_stems.len()
        );
    }

    #[test]
    fn test_score_is_deterministic() {
        let resume = sections("go, terraform", "Led cloud migration", "AWS certified");
        let jd = "Cloud engineer with Terraform and Go experience leading migrations";
        let first = score(&resume, jd);
        for _ in 0..5 {
            assert_eq!(score(&resume, jd), first);
        }
    }

    #[test]
    fn test_adding_jd_keyword_to_skills_never_lowers_score() {
        let jd = "python django postgres redis celery docker";
        let base = sections("python", "redis caching", "docker meetup");
        let base_score = score(&base, jd).score;

        for keyword in jd.split_whitespace() {
            let boosted = sections(
                &format!("{} {keyword}", base.skills),
                &base.experience,
                &base.other,
            );
            assert!(
                score(&boosted, jd).score >= base_score,
                "adding {keyword} lowered the score"
            );
        }
    }

    #[test]
    fn test_score_bounded_0_to_100() {
        let cases = [
            ("", "", "", "rust"),
            ("rust go java", "rust", "rust", "rust go"),
            ("a b c", "the", "of", "python"),
            ("python", "python", "python", "python python python"),
        ];
        for (s, e, o, jd) in cases {
            let report = score(&sections(s, e, o), jd);
            assert!(report.score <= 100);
        }
    }

    #[test]
    fn test_job_description_past_the_cap_is_ignored() {
        let jd = format!("rust {}kafka", " ".repeat(MAX_INPUT_CHARS));
        let report = score(&sections("rust kafka", "", ""), &jd);
        assert_eq!(report.matched_keywords, vec!["rust"]);
        assert!(report.missing_keywords.is_empty());
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_resume_section_past_the_cap_is_ignored() {
        let skills = format!("{}kafka", " ".repeat(MAX_INPUT_CHARS));
        let report = score(&sections(&skills, "", ""), "kafka");
        assert!(report.matched_keywords.is_empty());
        assert_eq!(report.missing_keywords, vec!["kafka"]);
        assert_eq!(report.score, 0);
    }

    #[test]
    fn test_guarded_turns_panic_into_internal_error() {
        let result: Result<(), AtsError> = guarded(|| panic!("boom"));
        assert_eq!(result, Err(AtsError::Internal("boom".to_string())));
    }

    #[test]
    fn test_guarded_passes_value_through() {
        assert_eq!(guarded(|| 7), Ok(7));
    }

    #[test]
    fn test_serialized_shape_is_camel_case_without_diagnostics() {
        let report = score(&sections("python", "", ""), "python sql");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "score": 50,
                "matchedKeywords": ["python"],
                "missingKeywords": ["sql"]
            })
        );
    }

    #[test]
    fn test_normalize_score_handles_zero_max() {
        assert_eq!(normalize_score(0, 0), 0);
        assert_eq!(normalize_score(9, 9), 100);
        assert_eq!(normalize_score(1, 6), 17);
    }

    #[test]
    fn test_panic_message_extraction() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("boom"));
        assert_eq!(panic_message(owned.as_ref()), "boom");
        let borrowed: Box<dyn Any + Send> = Box::new("bang");
        assert_eq!(panic_message(borrowed.as_ref()), "bang");
        let other: Box<dyn Any + Send> = Box::new(42_u8);
        assert!(panic_message(other.as_ref()).contains("internal error"));
    }

    #[test]
    fn test_backend_label_is_keyword() {
        assert_eq!(KeywordScorer::new().backend(), "keyword");
    }
}
