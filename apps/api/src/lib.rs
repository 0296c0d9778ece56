//! Resume ATS keyword scoring service.
//!
//! The scorer is usable as a plain library call via
//! [`ats::keyword_scorer::score_resume_with_keywords`]; the HTTP surface in
//! [`routes`] wraps it for the resume editor.

pub mod ats;
pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod sanitize;
pub mod state;
