use chrono::{Local, NaiveDate};
use std::fmt;

pub const DISPLAY_FMT: &str = "%d/%m/%Y";

/// A calendar-valid visit date, displayed as `DD/MM/YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VisitDate(NaiveDate);

impl VisitDate {
    /// Reads exactly eight digits as `DDMMYYYY`, ignoring any punctuation
    /// already typed in between. Fewer or more digits, or a day/month
    /// combination that does not exist on the calendar, is not a date.
    pub fn from_digits(input: &str) -> Option<Self> {
        let digits: String = input.chars().filter(|ch| ch.is_ascii_digit()).collect();
        if digits.len() != 8 {
            return None;
        }
        let day: u32 = digits[0..2].parse().ok()?;
        let month: u32 = digits[2..4].parse().ok()?;
        let year: i32 = digits[4..8].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Accepts the canonical display form or raw 8-digit input.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(date) = Self::from_digits(trimmed) {
            return Some(date);
        }
        NaiveDate::parse_from_str(trimmed, DISPLAY_FMT).ok().map(Self)
    }

    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    /// ISO `YYYY-MM-DD` rendering, used for range comparison in the store.
    pub fn iso(self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for VisitDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FMT))
    }
}

/// While typing, reformat only once the field holds exactly eight digits;
/// partial input stays untouched until the field loses focus.
pub fn autoformat_typing(input: &str) -> Option<String> {
    let digit_count = input.chars().filter(|ch| ch.is_ascii_digit()).count();
    if digit_count != 8 {
        return None;
    }
    VisitDate::from_digits(input).map(|date| date.to_string())
}

#[cfg(test)]
mod tests {
    use super::{autoformat_typing, VisitDate};

    #[test]
    fn eight_digits_become_a_slashed_date() {
        let date = VisitDate::from_digits("01032024").unwrap();
        assert_eq!(date.to_string(), "01/03/2024");
        assert_eq!(date.iso(), "2024-03-01");
    }

    #[test]
    fn leap_day_is_valid_only_in_leap_years() {
        assert_eq!(
            VisitDate::from_digits("29022024").unwrap().to_string(),
            "29/02/2024"
        );
        assert!(VisitDate::from_digits("29022023").is_none());
    }

    #[test]
    fn day_past_end_of_month_is_rejected() {
        assert!(VisitDate::from_digits("31042024").is_none());
        assert!(VisitDate::from_digits("31052024").is_some());
    }

    #[test]
    fn partial_input_is_not_a_date() {
        assert!(VisitDate::from_digits("0103202").is_none());
        assert!(VisitDate::from_digits("010320245").is_none());
        assert!(VisitDate::parse("").is_none());
    }

    #[test]
    fn parse_accepts_display_form_and_digit_runs() {
        assert_eq!(
            VisitDate::parse("05/11/2023").unwrap().iso(),
            "2023-11-05"
        );
        assert_eq!(VisitDate::parse("05112023").unwrap().iso(), "2023-11-05");
    }

    #[test]
    fn typing_reformat_waits_for_the_eighth_digit() {
        assert!(autoformat_typing("0103202").is_none());
        assert_eq!(
            autoformat_typing("01032024").as_deref(),
            Some("01/03/2024")
        );
        // eight digits that are not a real date stay as typed
        assert!(autoformat_typing("99999999").is_none());
    }
}
