//! Axum route handlers for the ATS API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::ats::keyword_scorer::KeywordAtsResult;
use crate::errors::AppError;
use crate::models::resume::{render_resume_text, Resume, ResumeTextSections};
use crate::sanitize::sanitize_and_trim;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordScoreRequest {
    #[serde(default)]
    pub resume_sections: ResumeTextSections,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct ResumeTextRequest {
    pub resume: Resume,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeScoreRequest {
    pub resume: Resume,
    #[serde(default)]
    pub job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/keyword-score
///
/// Scores pre-assembled resume sections against a job description.
pub async fn handle_keyword_score(
    State(state): State<AppState>,
    Json(request): Json<KeywordScoreRequest>,
) -> Result<Json<KeywordAtsResult>, AppError> {
    score_sections(&state, &request.resume_sections, &request.job_description)
}

/// POST /api/v1/resumes/ats-score
///
/// Assembles tier text from a structured resume, then scores it.
pub async fn handle_resume_score(
    State(state): State<AppState>,
    Json(request): Json<ResumeScoreRequest>,
) -> Result<Json<KeywordAtsResult>, AppError> {
    let sections = ResumeTextSections::from_resume(&request.resume);
    score_sections(&state, &sections, &request.job_description)
}

/// POST /api/v1/resumes/text
///
/// Plain-text rendering of a structured resume, for text export.
pub async fn handle_resume_text(Json(request): Json<ResumeTextRequest>) -> String {
    render_resume_text(&request.resume)
}

fn score_sections(
    state: &AppState,
    sections: &ResumeTextSections,
    job_description: &str,
) -> Result<Json<KeywordAtsResult>, AppError> {
    let section_limit = state.config.max_resume_section_chars;
    let sections = ResumeTextSections {
        skills: sanitize_and_trim(&sections.skills, section_limit),
        experience: sanitize_and_trim(&sections.experience, section_limit),
        other: sanitize_and_trim(&sections.other, section_limit),
    };
    let job_description =
        sanitize_and_trim(job_description, state.config.max_job_description_chars);

    let result = state.scorer.score(&sections, &job_description)?;

    info!(
        backend = state.scorer.backend(),
        score = result.score,
        matched = result.matched_keywords.len(),
        missing = result.missing_keywords.len(),
        "ATS keyword score served"
    );

    Ok(Json(result))
}
