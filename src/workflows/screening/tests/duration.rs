use super::common::*;
use crate::workflows::screening::domain::ExperienceEnd;
use crate::workflows::screening::evaluation::{
    duration_years, duration_years_from_today, DurationError, MonthYear,
};
use chrono::{Datelike, Local};
use proptest::prelude::*;

fn years(start: &str, end: &str) -> f64 {
    duration_years(start, &ExperienceEnd::parse(end), today())
}

#[test]
fn same_month_has_zero_duration() {
    assert_close(years("03/2021", "03/2021"), 0.0);
}

#[test]
fn multi_year_spans_count_whole_months() {
    assert_close(years("01/2020", "01/2022"), 2.0);
    assert_close(years("01/2020", "07/2021"), 1.5);
    assert_close(years("11/2019", "02/2020"), 0.25);
}

#[test]
fn single_digit_month_is_accepted() {
    assert_close(years("3/2020", "09/2020"), 0.5);
}

#[test]
fn present_uses_the_reference_month() {
    // today() is 15 June 2025
    assert_close(years("01/2020", "Present"), 5.0 + 5.0 / 12.0);
    assert_close(years("06/2025", "present"), 0.0);
}

#[test]
fn present_defaults_to_the_local_clock() {
    let now = Local::now().date_naive();
    let expected = f64::from(now.year() - 2020) + f64::from(now.month() - 1) / 12.0;
    let actual = duration_years_from_today("01/2020", &ExperienceEnd::Present);
    // allow for the month rolling over between the two clock reads
    assert!((actual - expected).abs() <= 1.0 / 12.0 + 1e-9);
}

#[test]
fn end_before_start_clamps_to_zero() {
    assert_close(years("05/2023", "01/2020"), 0.0);
}

#[test]
fn malformed_input_yields_zero() {
    assert_close(years("2020-01", "03/2021"), 0.0);
    assert_close(years("ab/2020", "03/2021"), 0.0);
    assert_close(years("01/2020", "Now"), 0.0);
    assert_close(years("13/2020", "03/2021"), 0.0);
    assert_close(years("", ""), 0.0);
    assert_close(years("01/20", "03/2021"), 0.0);
}

#[test]
fn parse_reports_specific_failures() {
    assert_eq!(
        MonthYear::parse("012020"),
        Err(DurationError::MissingSeparator("012020".to_string()))
    );
    assert_eq!(
        MonthYear::parse("x1/2020"),
        Err(DurationError::NotNumeric("x1/2020".to_string()))
    );
    assert_eq!(
        MonthYear::parse("00/2020"),
        Err(DurationError::MonthOutOfRange {
            raw: "00/2020".to_string(),
            month: 0
        })
    );
    assert_eq!(
        MonthYear::parse(" 04/2019 "),
        Ok(MonthYear {
            year: 2019,
            month: 4
        })
    );
}

#[test]
fn month_year_displays_zero_padded() {
    let value = MonthYear { year: 2021, month: 3 };
    assert_eq!(value.to_string(), "03/2021");
}

fn month_year() -> impl Strategy<Value = (u32, i32)> {
    (1u32..=12, 1990i32..=2030)
}

proptest! {
    #[test]
    fn duration_is_never_negative((sm, sy) in month_year(), (em, ey) in month_year()) {
        let value = years(&format!("{sm:02}/{sy}"), &format!("{em:02}/{ey}"));
        prop_assert!(value >= 0.0);
    }

    #[test]
    fn duration_grows_with_later_end(
        (sm, sy) in month_year(),
        (em, ey) in month_year(),
        extra in 0i32..120,
    ) {
        let start = format!("{sm:02}/{sy}");
        let end = format!("{em:02}/{ey}");
        let total = (em as i32 - 1) + extra;
        let later = format!("{:02}/{}", total % 12 + 1, ey + total / 12);

        prop_assert!(years(&start, &later) >= years(&start, &end));
    }
}
