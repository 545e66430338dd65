use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub u64);

/// Identifier wrapper for applicants (one applicant may apply to many postings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub u64);

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobPostingId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriteriaId(pub u64);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for JobPostingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for CriteriaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One skill-to-points mapping with a per-year rate and a maximum cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub skill: String,
    pub points_per_year_of_experience: f64,
    pub max_points: f64,
}

impl Rule {
    pub fn new(skill: impl Into<String>, points_per_year_of_experience: f64, max_points: f64) -> Self {
        Self {
            skill: skill.into(),
            points_per_year_of_experience,
            max_points,
        }
    }
}

/// Named set of scoring rules attached to a job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    pub id: CriteriaId,
    pub job_posting_id: JobPostingId,
    pub name: String,
    pub rules: Vec<Rule>,
}

/// Marker written by the applicant portal for an ongoing position.
pub const PRESENT_MARKER: &str = "Present";

/// End bound of a declared experience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperienceEnd {
    /// Raw `MM/YYYY` text as submitted; parsed lazily by the duration calculator.
    Month(String),
    Present,
}

impl ExperienceEnd {
    /// Blank text and the present marker (any case) both mean an ongoing position.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(PRESENT_MARKER) {
            Self::Present
        } else {
            Self::Month(raw.to_string())
        }
    }
}

impl fmt::Display for ExperienceEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceEnd::Month(raw) => f.write_str(raw),
            ExperienceEnd::Present => f.write_str(PRESENT_MARKER),
        }
    }
}

impl Serialize for ExperienceEnd {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ExperienceEnd {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map_or(ExperienceEnd::Present, |value| ExperienceEnd::parse(&value)))
    }
}

/// One entry in a candidate's declared work history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    pub start_date: String,
    #[serde(default = "present")]
    pub end_date: ExperienceEnd,
    pub skills: Vec<String>,
    #[serde(default)]
    pub description: String,
}

fn present() -> ExperienceEnd {
    ExperienceEnd::Present
}

/// Typed view of an application as seen by the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub job_posting_id: JobPostingId,
    pub applicant_id: ApplicantId,
    pub experiences: Vec<Experience>,
}

/// Publication state of a job posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobPostingStatus {
    Draft,
    Open,
    Closed,
}

impl JobPostingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            JobPostingStatus::Draft => "draft",
            JobPostingStatus::Open => "open",
            JobPostingStatus::Closed => "closed",
        }
    }
}

/// Job posting counters touched by the scoring pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: JobPostingId,
    pub title: String,
    pub status: JobPostingStatus,
    #[serde(default, rename = "num_applicants")]
    pub num_applicants: u32,
    #[serde(default, rename = "num_machine_evaluated")]
    pub num_machine_evaluated: u32,
}
