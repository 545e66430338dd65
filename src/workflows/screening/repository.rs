use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{ApplicantId, ApplicationId, CriteriaId, JobPostingId};

/// Stored application row. `experience_json` is kept exactly as the portal wrote it
/// and is only decoded at the intake boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub job_posting_id: JobPostingId,
    pub applicant_id: ApplicantId,
    #[serde(default)]
    pub resume_path: String,
    #[serde(default)]
    pub experience_json: Value,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Stored criteria row with its loosely-typed rule blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaRecord {
    pub id: CriteriaId,
    pub job_posting_id: JobPostingId,
    #[serde(default)]
    pub name: String,
    pub criteria_json: Value,
}

/// Storage abstraction so the scoring service can be exercised in isolation.
pub trait ScoringRepository: Send + Sync {
    fn applications_for(
        &self,
        job_posting_id: JobPostingId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError>;
    fn criteria_for(&self, job_posting_id: JobPostingId)
        -> Result<Vec<CriteriaRecord>, RepositoryError>;
    fn save_score(&self, application_id: ApplicationId, score: f64) -> Result<(), RepositoryError>;
    /// Returns `false` when the job posting no longer exists.
    fn update_machine_evaluated(
        &self,
        job_posting_id: JobPostingId,
        count: usize,
    ) -> Result<bool, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
