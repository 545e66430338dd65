use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::workflows::screening::domain::{
    ApplicantId, Application, ApplicationId, Criteria, CriteriaId, Experience, ExperienceEnd,
    JobPostingId, Rule,
};
use crate::workflows::screening::evaluation::ScoringEngine;
use crate::workflows::screening::repository::{
    ApplicationRecord, CriteriaRecord, RepositoryError, ScoringRepository,
};

pub(super) const JOB: JobPostingId = JobPostingId(7);

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(today())
}

pub(super) fn rule(skill: &str, per_year: f64, max: f64) -> Rule {
    Rule::new(skill, per_year, max)
}

pub(super) fn criteria(name: &str, rules: Vec<Rule>) -> Criteria {
    Criteria {
        id: CriteriaId(1),
        job_posting_id: JOB,
        name: name.to_string(),
        rules,
    }
}

pub(super) fn experience(start: &str, end: &str, skills: &[&str]) -> Experience {
    Experience {
        title: "Software Engineer".to_string(),
        company: "Acme".to_string(),
        start_date: start.to_string(),
        end_date: ExperienceEnd::parse(end),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        description: String::new(),
    }
}

pub(super) fn application(experiences: Vec<Experience>) -> Application {
    Application {
        id: ApplicationId(1),
        job_posting_id: JOB,
        applicant_id: ApplicantId(100),
        experiences,
    }
}

pub(super) fn experience_json(experiences: Value) -> Value {
    json!({ "experiences": experiences })
}

pub(super) fn python_experience_json() -> Value {
    experience_json(json!([
        {
            "title": "Backend Engineer",
            "company": "Initech",
            "startDate": "01/2020",
            "endDate": "01/2022",
            "skills": ["Python", "SQL"],
            "description": "APIs"
        }
    ]))
}

pub(super) fn application_record(id: u64, experience_json: Value) -> ApplicationRecord {
    ApplicationRecord {
        id: ApplicationId(id),
        job_posting_id: JOB,
        applicant_id: ApplicantId(100 + id),
        resume_path: format!("{}-{}", JOB.0, 100 + id),
        experience_json,
        score: None,
    }
}

pub(super) fn criteria_record(id: u64, rules: Value) -> CriteriaRecord {
    CriteriaRecord {
        id: CriteriaId(id),
        job_posting_id: JOB,
        name: format!("criteria-{id}"),
        criteria_json: json!({ "rules": rules }),
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    pub applications: Mutex<BTreeMap<ApplicationId, ApplicationRecord>>,
    pub criteria: Mutex<Vec<CriteriaRecord>>,
    pub evaluated_counts: Mutex<Vec<(JobPostingId, usize)>>,
    pub failing_saves: Mutex<HashSet<ApplicationId>>,
    pub posting_exists: bool,
}

impl MemoryRepository {
    pub(super) fn with(applications: Vec<ApplicationRecord>, criteria: Vec<CriteriaRecord>) -> Self {
        Self {
            applications: Mutex::new(
                applications
                    .into_iter()
                    .map(|record| (record.id, record))
                    .collect(),
            ),
            criteria: Mutex::new(criteria),
            posting_exists: true,
            ..Self::default()
        }
    }

    pub(super) fn fail_save_for(&self, id: ApplicationId) {
        self.failing_saves.lock().expect("lock").insert(id);
    }

    pub(super) fn score_of(&self, id: ApplicationId) -> Option<f64> {
        self.applications
            .lock()
            .expect("lock")
            .get(&id)
            .and_then(|record| record.score)
    }

    pub(super) fn counts(&self) -> Vec<(JobPostingId, usize)> {
        self.evaluated_counts.lock().expect("lock").clone()
    }
}

impl ScoringRepository for MemoryRepository {
    fn applications_for(
        &self,
        job_posting_id: JobPostingId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(self
            .applications
            .lock()
            .expect("lock")
            .values()
            .filter(|record| record.job_posting_id == job_posting_id)
            .cloned()
            .collect())
    }

    fn criteria_for(
        &self,
        job_posting_id: JobPostingId,
    ) -> Result<Vec<CriteriaRecord>, RepositoryError> {
        Ok(self
            .criteria
            .lock()
            .expect("lock")
            .iter()
            .filter(|record| record.job_posting_id == job_posting_id)
            .cloned()
            .collect())
    }

    fn save_score(&self, application_id: ApplicationId, score: f64) -> Result<(), RepositoryError> {
        if self
            .failing_saves
            .lock()
            .expect("lock")
            .contains(&application_id)
        {
            return Err(RepositoryError::Unavailable("database offline".to_string()));
        }
        let mut guard = self.applications.lock().expect("lock");
        let record = guard
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
        self.evaluated_counts
            .lock()
            .expect("lock")
            .push((job_posting_id, count));
        Ok(self.posting_exists)
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
