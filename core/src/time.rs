use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate, NaiveTime, Utc, Weekday};

use crate::error::ParseError;

/// Source of "now" and of the calendar day used for due-date bucketing.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
    fn today(&self) -> NaiveDate;
}

/// Wall clock. "Today" is the local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>, today: NaiveDate) -> Self {
        Self { now, today }
    }

    /// Frozen at noon UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
        Self {
            now: date.and_time(noon).and_utc(),
            today: date,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Parses a due-date expression relative to `today`.
///
/// Accepts `today`, `tomorrow`, `yesterday`, `eow`, `eom`, `+Nd`/`+Nw`/`+Nm`,
/// weekday names (`fri`, `2:fri`) and ISO dates (`2025-01-31`).
pub fn parse_due_date(input: &str, today: NaiveDate) -> Result<NaiveDate, ParseError> {
    let input = input.trim();
    let invalid = || ParseError::InvalidDate(input.to_string());

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return today.succ_opt().ok_or_else(invalid),
        "yesterday" | "yest" => return today.pred_opt().ok_or_else(invalid),
        "eow" => {
            // Coming Sunday, or today when it already is Sunday
            let days = (7 - today.weekday().num_days_from_sunday()) % 7;
            return today
                .checked_add_days(Days::new(u64::from(days)))
                .ok_or_else(invalid);
        }
        "eom" => {
            let first = today.with_day(1).ok_or_else(invalid)?;
            let next_month = first.checked_add_months(Months::new(1)).ok_or_else(invalid)?;
            return next_month.pred_opt().ok_or_else(invalid);
        }
        _ => {}
    }

    // 2. Relative format (+Nd, +Nw, +Nm)
    if let Some(body) = input.strip_prefix('+') {
        if body.len() < 2 || !body.is_ascii() {
            return Err(invalid());
        }
        let (num_str, unit) = body.split_at(body.len() - 1);
        let count: u32 = num_str.parse().map_err(|_| invalid())?;

        return match unit.to_lowercase().as_str() {
            "d" => today.checked_add_days(Days::new(u64::from(count))).ok_or_else(invalid),
            "w" => u64::from(count)
                .checked_mul(7)
                .and_then(|days| today.checked_add_days(Days::new(days)))
                .ok_or_else(invalid),
            // chrono clamps to the last day of a shorter month
            "m" => today.checked_add_months(Months::new(count)).ok_or_else(invalid),
            _ => Err(invalid()),
        };
    }

    // 3. Weekday format (fri, 2:fri)
    if let Some((count, day_str)) = parse_weekday_token(input) {
        if let Some(target) = parse_weekday_str(day_str) {
            let mut days_needed = (7 + target.num_days_from_sunday()
                - today.weekday().num_days_from_sunday())
                % 7;
            if days_needed == 0 {
                days_needed = 7;
            }
            return (count - 1)
                .checked_mul(7)
                .and_then(|extra| extra.checked_add(u64::from(days_needed)))
                .and_then(|days| today.checked_add_days(Days::new(days)))
                .ok_or_else(invalid);
        }
    }

    // 4. ISO date
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| invalid())
}

fn parse_weekday_token(input: &str) -> Option<(u64, &str)> {
    match input.split_once(':') {
        Some((count, day)) => {
            let count: u64 = count.parse().ok()?;
            (count >= 1).then_some((count, day))
        }
        None => Some((1, input)),
    }
}

fn parse_weekday_str(s: &str) -> Option<Weekday> {
    match s.to_lowercase().as_str() {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}
