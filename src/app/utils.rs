// src/app/utils.rs
use chrono::{Datelike, Local, NaiveDate};

/// How many years the year selector offers, newest first.
pub const YEAR_OPTION_COUNT: usize = 25;

/// One entry of the year selector: label for display, value for the `dates` filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearOption {
    pub label: String,
    pub value: String,
}

pub fn current_year() -> i32 {
    Local::now().year()
}

/// "2021" → "2021-01-01,2021-12-31"
pub fn year_range(year: i32) -> String {
    format!("{year:04}-01-01,{year:04}-12-31")
}

pub fn year_options(newest: i32, count: usize) -> Vec<YearOption> {
    (0..count)
        .map(|i| newest - i as i32)
        .map(|y| YearOption {
            label: y.to_string(),
            value: year_range(y),
        })
        .collect()
}

/// Split a "start,end" dates filter. None for blank or malformed input.
pub fn parse_date_range(s: &str) -> Option<(NaiveDate, NaiveDate)> {
    let (a, b) = s.trim().split_once(',')?;
    let start = NaiveDate::parse_from_str(a.trim(), "%Y-%m-%d").ok()?;
    let end = NaiveDate::parse_from_str(b.trim(), "%Y-%m-%d").ok()?;
    (start <= end).then_some((start, end))
}

/// Year of a RAWG "released" date ("2013-09-17").
pub fn release_year(released: &str) -> Option<i32> {
    NaiveDate::parse_from_str(released.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
}
