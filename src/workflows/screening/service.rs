use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::domain::{ApplicantId, ApplicationId, Criteria, JobPostingId};
use super::evaluation::{max_attainable_score, ScoringEngine};
use super::intake::{decode_application, decode_criteria, validate_experience, IntakeError};
use super::repository::{ApplicationRecord, RepositoryError, ScoringRepository};

/// Batch orchestrator composing the repository with the scoring engine.
pub struct ApplicationScoringService<R> {
    repository: Arc<R>,
    engine: ScoringEngine,
}

impl<R> ApplicationScoringService<R>
where
    R: ScoringRepository + 'static,
{
    pub fn new(repository: Arc<R>, engine: ScoringEngine) -> Self {
        Self { repository, engine }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Re-score every application of a job posting and persist the results.
    ///
    /// Applications are evaluated one at a time. A malformed application is logged
    /// and left untouched; a repository failure aborts the run.
    pub fn update_application_scores(
        &self,
        job_posting_id: JobPostingId,
    ) -> Result<BatchOutcome, ScoringServiceError> {
        let applications = self.repository.applications_for(job_posting_id)?;
        if applications.is_empty() {
            info!(%job_posting_id, "no applications found for job posting");
            return Ok(BatchOutcome::Skipped(SkipReason::NoApplications));
        }

        let criteria = self.load_criteria(job_posting_id)?;
        if criteria.is_empty() {
            info!(%job_posting_id, "no criteria found for job posting");
            return Ok(BatchOutcome::Skipped(SkipReason::NoCriteria));
        }

        let mut summary = BatchSummary {
            job_posting_id,
            evaluated: 0,
            failures: Vec::new(),
            max_attainable_score: max_attainable_score(&criteria),
        };

        for record in &applications {
            match self.score_record(record, &criteria) {
                Ok(score) => {
                    self.repository.save_score(record.id, score)?;
                    summary.evaluated += 1;
                }
                Err(err) => {
                    error!(
                        application_id = %record.id,
                        applicant_id = %record.applicant_id,
                        %job_posting_id,
                        error = %err,
                        "failed to score application"
                    );
                    summary.failures.push(ScoringFailure {
                        application_id: record.id,
                        applicant_id: record.applicant_id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        let found = self
            .repository
            .update_machine_evaluated(job_posting_id, summary.evaluated)?;
        if !found {
            warn!(%job_posting_id, "job posting disappeared before its evaluated count was updated");
        }

        info!(
            %job_posting_id,
            evaluated = summary.evaluated,
            failed = summary.failures.len(),
            "scored applications for job posting"
        );

        Ok(BatchOutcome::Completed(summary))
    }

    fn load_criteria(&self, job_posting_id: JobPostingId) -> Result<Vec<Criteria>, RepositoryError> {
        let records = self.repository.criteria_for(job_posting_id)?;
        let criteria = records
            .iter()
            .filter_map(|record| match decode_criteria(record) {
                Ok(criteria) => Some(criteria),
                Err(err) => {
                    warn!(criteria_id = %record.id, %job_posting_id, error = %err, "skipping unreadable criteria");
                    None
                }
            })
            .collect();
        Ok(criteria)
    }

    fn score_record(
        &self,
        record: &ApplicationRecord,
        criteria: &[Criteria],
    ) -> Result<f64, IntakeError> {
        let application = decode_application(record)?;

        for experience in &application.experiences {
            for issue in validate_experience(experience, self.engine.today()) {
                debug!(application_id = %application.id, issue = %issue.summary(), "experience date issue");
            }
        }

        Ok(self.engine.evaluate(&application, criteria))
    }
}

/// Why a batch did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoApplications,
    NoCriteria,
}

impl SkipReason {
    pub const fn label(self) -> &'static str {
        match self {
            SkipReason::NoApplications => "no applications",
            SkipReason::NoCriteria => "no criteria",
        }
    }
}

/// Result of one batch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "detail")]
pub enum BatchOutcome {
    Skipped(SkipReason),
    Completed(BatchSummary),
}

impl BatchOutcome {
    pub fn evaluated(&self) -> usize {
        match self {
            BatchOutcome::Skipped(_) => 0,
            BatchOutcome::Completed(summary) => summary.evaluated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub job_posting_id: JobPostingId,
    pub evaluated: usize,
    pub failures: Vec<ScoringFailure>,
    pub max_attainable_score: f64,
}

/// Application skipped by a batch, with the decode error that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoringFailure {
    pub application_id: ApplicationId,
    pub applicant_id: ApplicantId,
    pub reason: String,
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
