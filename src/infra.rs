//! In-memory persistence used by the CLI and tests, hydrated from a JSON dataset.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::workflows::screening::{
    ApplicationId, ApplicationRecord, CriteriaRecord, JobPosting, JobPostingId, RepositoryError,
    ScoringRepository,
};

/// Snapshot of the tables the scoring pass reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub job_postings: Vec<JobPosting>,
    #[serde(default)]
    pub criteria: Vec<CriteriaRecord>,
    #[serde(default)]
    pub applications: Vec<ApplicationRecord>,
}

impl Dataset {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::from_reader(BufReader::new(file))?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("unable to open dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default)]
struct Tables {
    job_postings: BTreeMap<JobPostingId, JobPosting>,
    criteria: Vec<CriteriaRecord>,
    applications: BTreeMap<ApplicationId, ApplicationRecord>,
}

#[derive(Default, Clone)]
pub struct InMemoryScoringRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryScoringRepository {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let tables = Tables {
            job_postings: dataset
                .job_postings
                .into_iter()
                .map(|posting| (posting.id, posting))
                .collect(),
            criteria: dataset.criteria,
            applications: dataset
                .applications
                .into_iter()
                .map(|record| (record.id, record))
                .collect(),
        };
        Self {
            tables: Arc::new(Mutex::new(tables)),
        }
    }

    pub fn application(&self, id: ApplicationId) -> Option<ApplicationRecord> {
        let guard = self.tables.lock().expect("repository mutex poisoned");
        guard.applications.get(&id).cloned()
    }

    pub fn job_posting(&self, id: JobPostingId) -> Option<JobPosting> {
        let guard = self.tables.lock().expect("repository mutex poisoned");
        guard.job_postings.get(&id).cloned()
    }

    /// Current contents, e.g. for writing the dataset back out.
    pub fn snapshot(&self) -> Dataset {
        let guard = self.tables.lock().expect("repository mutex poisoned");
        Dataset {
            job_postings: guard.job_postings.values().cloned().collect(),
            criteria: guard.criteria.clone(),
            applications: guard.applications.values().cloned().collect(),
        }
    }
}

impl ScoringRepository for InMemoryScoringRepository {
    fn applications_for(
        &self,
        job_posting_id: JobPostingId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.tables.lock().expect("repository mutex poisoned");
        Ok(guard
            .applications
            .values()
            .filter(|record| record.job_posting_id == job_posting_id)
            .cloned()
            .collect())
    }

    fn criteria_for(
        &self,
        job_posting_id: JobPostingId,
    ) -> Result<Vec<CriteriaRecord>, RepositoryError> {
        let guard = self.tables.lock().expect("repository mutex poisoned");
        Ok(guard
            .criteria
            .iter()
            .filter(|record| record.job_posting_id == job_posting_id)
            .cloned()
            .collect())
    }

    fn save_score(&self, application_id: ApplicationId, score: f64) -> Result<(), RepositoryError> {
        let mut guard = self.tables.lock().expect("repository mutex poisoned");
        let record = guard
            .applications
            .get_mut(&application_id)
            .ok_or(RepositoryError::NotFound)?;
        record.score = Some(score);
        Ok(())
    }

    fn update_machine_evaluated(
        &self,
        job_posting_id: JobPostingId,
        count: usize,
    ) -> Result<bool, RepositoryError> {
        let mut guard = self.tables.lock().expect("repository mutex poisoned");
        match guard.job_postings.get_mut(&job_posting_id) {
            Some(posting) => {
                posting.num_machine_evaluated = u32::try_from(count).unwrap_or(u32::MAX);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
