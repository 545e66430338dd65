//! Boundary between stored JSON blobs and the typed records the engine consumes.

use chrono::NaiveDate;
use serde::Deserialize;

use super::domain::{Application, ApplicationId, Criteria, CriteriaId, Experience, ExperienceEnd, Rule};
use super::evaluation::MonthYear;
use super::repository::{ApplicationRecord, CriteriaRecord};

/// Decode failures raised while reading stored rows.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("application {id} has no experience list")]
    MissingExperiences { id: ApplicationId },
    #[error("application {id} has malformed experience data: {source}")]
    MalformedExperiences {
        id: ApplicationId,
        source: serde_json::Error,
    },
    #[error("criteria {id} has no rule list")]
    MissingRules { id: CriteriaId },
    #[error("criteria {id} has malformed rules: {source}")]
    MalformedRules {
        id: CriteriaId,
        source: serde_json::Error,
    },
    #[error("criteria {id} rule #{index} is invalid: {reason}")]
    InvalidRule {
        id: CriteriaId,
        index: usize,
        reason: &'static str,
    },
}

pub fn decode_application(record: &ApplicationRecord) -> Result<Application, IntakeError> {
    let experiences = record
        .experience_json
        .get("experiences")
        .filter(|value| !value.is_null())
        .ok_or(IntakeError::MissingExperiences { id: record.id })?;

    let experiences = Vec::<Experience>::deserialize(experiences).map_err(|source| {
        IntakeError::MalformedExperiences {
            id: record.id,
            source,
        }
    })?;

    Ok(Application {
        id: record.id,
        job_posting_id: record.job_posting_id,
        applicant_id: record.applicant_id,
        experiences,
    })
}

pub fn decode_criteria(record: &CriteriaRecord) -> Result<Criteria, IntakeError> {
    let rules = record
        .criteria_json
        .get("rules")
        .filter(|value| !value.is_null())
        .ok_or(IntakeError::MissingRules { id: record.id })?;

    let rules = Vec::<Rule>::deserialize(rules).map_err(|source| IntakeError::MalformedRules {
        id: record.id,
        source,
    })?;

    for (index, rule) in rules.iter().enumerate() {
        validate_rule(rule).map_err(|reason| IntakeError::InvalidRule {
            id: record.id,
            index,
            reason,
        })?;
    }

    Ok(Criteria {
        id: record.id,
        job_posting_id: record.job_posting_id,
        name: record.name.clone(),
        rules,
    })
}

fn validate_rule(rule: &Rule) -> Result<(), &'static str> {
    if rule.skill.trim().is_empty() {
        return Err("skill name is blank");
    }
    if !rule.points_per_year_of_experience.is_finite() || rule.points_per_year_of_experience < 0.0
    {
        return Err("points per year must be a non-negative number");
    }
    if !rule.max_points.is_finite() || rule.max_points < 0.0 {
        return Err("max points must be a non-negative number");
    }
    Ok(())
}

/// Submission-time date problems. Scoring tolerates all of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperienceIssue {
    UnreadableStart(String),
    StartInFuture(MonthYear),
    UnreadableEnd(String),
    EndNotAfterStart { start: MonthYear, end: MonthYear },
}

impl ExperienceIssue {
    pub fn summary(&self) -> String {
        match self {
            ExperienceIssue::UnreadableStart(raw) => {
                format!("start date '{raw}' must be a valid MM/YYYY date")
            }
            ExperienceIssue::StartInFuture(start) => {
                format!("start date {start} must be in the past or current month")
            }
            ExperienceIssue::UnreadableEnd(raw) => {
                format!("end date '{raw}' must be a valid MM/YYYY date")
            }
            ExperienceIssue::EndNotAfterStart { start, end } => {
                format!("end date {end} must be after start date {start}")
            }
        }
    }
}

/// Check an experience the way the applicant portal does at submission.
pub fn validate_experience(experience: &Experience, today: NaiveDate) -> Vec<ExperienceIssue> {
    let mut issues = Vec::new();

    let Ok(start) = MonthYear::parse(&experience.start_date) else {
        issues.push(ExperienceIssue::UnreadableStart(
            experience.start_date.clone(),
        ));
        return issues;
    };

    if start > MonthYear::from_date(today) {
        issues.push(ExperienceIssue::StartInFuture(start));
    }

    if let ExperienceEnd::Month(raw) = &experience.end_date {
        match MonthYear::parse(raw) {
            Ok(end) if end <= start => {
                issues.push(ExperienceIssue::EndNotAfterStart { start, end });
            }
            Ok(_) => {}
            Err(_) => issues.push(ExperienceIssue::UnreadableEnd(raw.clone())),
        }
    }

    issues
}
