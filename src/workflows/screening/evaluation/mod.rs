pub mod duration;
mod rules;

pub use duration::{duration_years, duration_years_from_today, DurationError, MonthYear};
pub use rules::{evaluate_skill, skill_matches};

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Application, ApplicationId, Criteria, Rule};

/// Stateless evaluator that scores applications against criteria.
///
/// The reference date stands in for the end of any ongoing ("Present") experience.
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine {
    today: NaiveDate,
}

impl ScoringEngine {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Score an application, keeping the per-skill trail for audits.
    ///
    /// Every rule of every criteria set is applied to every skill mention. Running
    /// totals are keyed by the rule's skill name and re-clamped to the rule's
    /// `max_points` after each addition, so one key never contributes more than its
    /// cap no matter how many experiences mention it.
    pub fn score(&self, application: &Application, criteria: &[Criteria]) -> ScoreBreakdown {
        let rules: Vec<&Rule> = criteria
            .iter()
            .flat_map(|criterion| criterion.rules.iter())
            .collect();

        let mut tallies: BTreeMap<&str, SkillTally> = BTreeMap::new();
        let mut matched_keywords = BTreeSet::new();

        for experience in &application.experiences {
            let duration = duration_years(&experience.start_date, &experience.end_date, self.today);

            for skill in &experience.skills {
                let mut matched_keys = BTreeSet::new();
                for rule in &rules {
                    let points = evaluate_skill(skill, duration, rule);
                    tallies
                        .entry(rule.skill.as_str())
                        .or_default()
                        .fold(points, rule.max_points);

                    if skill_matches(skill, rule) {
                        matched_keys.insert(rule.skill.as_str());
                        matched_keywords.insert(skill.clone());
                    }
                }

                // one mention per key, however many rules share it
                for key in matched_keys {
                    if let Some(tally) = tallies.get_mut(key) {
                        tally.mentions += 1;
                    }
                }
            }
        }

        let total = tallies.values().map(|tally| tally.points).sum();
        let components = tallies
            .into_iter()
            .filter(|(_, tally)| tally.mentions > 0)
            .map(|(skill, tally)| SkillScore {
                skill: skill.to_string(),
                points: tally.points,
                max_points: tally.max_points,
                mentions: tally.mentions,
                capped: tally.capped,
            })
            .collect();

        ScoreBreakdown {
            application_id: application.id,
            total,
            components,
            matched_keywords: matched_keywords.into_iter().collect(),
        }
    }

    pub fn evaluate(&self, application: &Application, criteria: &[Criteria]) -> f64 {
        self.score(application, criteria).total
    }
}

#[derive(Debug, Default)]
struct SkillTally {
    points: f64,
    max_points: f64,
    mentions: usize,
    capped: bool,
}

impl SkillTally {
    fn fold(&mut self, points: f64, max_points: f64) {
        let raw = self.points + points;
        if raw > max_points {
            self.capped = true;
        }
        self.points = raw.min(max_points);
        self.max_points = max_points;
    }
}

/// Convenience wrapper for callers that only need the number.
pub fn evaluate_application(
    application: &Application,
    criteria: &[Criteria],
    today: NaiveDate,
) -> f64 {
    ScoringEngine::new(today).evaluate(application, criteria)
}

/// Highest score any application could reach under `criteria`.
///
/// Rules sharing a skill name share a bucket. Every mention folds through the
/// rules in order, so the last rule for a name has the final clamp and its cap
/// bounds the bucket.
pub fn max_attainable_score(criteria: &[Criteria]) -> f64 {
    let mut caps: BTreeMap<&str, f64> = BTreeMap::new();
    for rule in criteria.iter().flat_map(|criterion| criterion.rules.iter()) {
        caps.insert(rule.skill.as_str(), rule.max_points);
    }
    caps.values().sum()
}

/// Capped contribution of one skill key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillScore {
    pub skill: String,
    pub points: f64,
    pub max_points: f64,
    /// Skill mentions that matched this key, each counted once.
    pub mentions: usize,
    /// True when the raw running total exceeded the cap at least once.
    pub capped: bool,
}

/// Evaluation output describing the composite score and its per-skill trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub application_id: ApplicationId,
    pub total: f64,
    pub components: Vec<SkillScore>,
    pub matched_keywords: Vec<String>,
}
