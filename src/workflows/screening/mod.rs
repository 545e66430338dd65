//! Machine screening of job applications.
//!
//! Candidates' declared work experience is matched against the scoring criteria of
//! the job posting they applied to. The engine itself is pure; the service drives it
//! over a repository and writes the scores back.

pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod report;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantId, Application, ApplicationId, Criteria, CriteriaId, Experience, ExperienceEnd,
    JobPosting, JobPostingId, JobPostingStatus, Rule, PRESENT_MARKER,
};
pub use evaluation::{
    duration_years, duration_years_from_today, evaluate_application, evaluate_skill,
    max_attainable_score, ScoreBreakdown, ScoringEngine, SkillScore,
};
pub use intake::{decode_application, decode_criteria, validate_experience, ExperienceIssue, IntakeError};
pub use report::{ranked_rows, write_csv, ScoreRow};
pub use repository::{ApplicationRecord, CriteriaRecord, RepositoryError, ScoringRepository};
pub use service::{
    ApplicationScoringService, BatchOutcome, BatchSummary, ScoringFailure, ScoringServiceError,
    SkipReason,
};
