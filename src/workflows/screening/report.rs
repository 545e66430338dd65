use std::io::Write;

use serde::Serialize;

use super::domain::{ApplicantId, ApplicationId, JobPostingId};
use super::repository::ApplicationRecord;

/// Flattened score row used for console and CSV output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRow {
    pub application_id: ApplicationId,
    pub applicant_id: ApplicantId,
    pub job_posting_id: JobPostingId,
    pub score: Option<f64>,
}

impl From<&ApplicationRecord> for ScoreRow {
    fn from(record: &ApplicationRecord) -> Self {
        Self {
            application_id: record.id,
            applicant_id: record.applicant_id,
            job_posting_id: record.job_posting_id,
            score: record.score,
        }
    }
}

/// Rows for one job posting, best score first. Unscored applications sort last.
pub fn ranked_rows<'a>(
    records: impl IntoIterator<Item = &'a ApplicationRecord>,
    job_posting_id: JobPostingId,
) -> Vec<ScoreRow> {
    let mut rows: Vec<ScoreRow> = records
        .into_iter()
        .filter(|record| record.job_posting_id == job_posting_id)
        .map(ScoreRow::from)
        .collect();

    rows.sort_by(|left, right| {
        let left_score = left.score.unwrap_or(f64::NEG_INFINITY);
        let right_score = right.score.unwrap_or(f64::NEG_INFINITY);
        right_score
            .total_cmp(&left_score)
            .then(left.application_id.cmp(&right.application_id))
    });
    rows
}

pub fn write_csv<W: Write>(rows: &[ScoreRow], writer: W) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
