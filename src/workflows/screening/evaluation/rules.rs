use super::super::domain::Rule;

/// Case-insensitive substring test: rule `react` matches the mention `ReactJS`.
pub fn skill_matches(skill_text: &str, rule: &Rule) -> bool {
    skill_text
        .to_lowercase()
        .contains(&rule.skill.to_lowercase())
}

/// Score one skill mention against one rule, capped at the rule's maximum.
pub fn evaluate_skill(skill_text: &str, duration_years: f64, rule: &Rule) -> f64 {
    if !skill_matches(skill_text, rule) {
        return 0.0;
    }

    let points = rule.points_per_year_of_experience * duration_years;
    points.min(rule.max_points)
}
