use chrono::{Datelike, Local, NaiveDate};

use crate::utils::FormError;

/// Passports in this registry are issued for ten years.
pub const VALIDITY_YEARS: i32 = 10;

const ISO_DATE: &str = "%Y-%m-%d";

pub struct DerivedFieldCalculator;

impl DerivedFieldCalculator {
    /// Whole years between `dob` and `today`, counting a year only once the
    /// birthday itself has been reached.
    pub fn calculate_age(dob: NaiveDate, today: NaiveDate) -> i32 {
        let mut age = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        age
    }

    pub fn age_on_today(dob: &str) -> Result<i32, FormError> {
        let dob = Self::parse_date(dob)?;
        Ok(Self::calculate_age(dob, Local::now().date_naive()))
    }

    /// Issue date plus ten years on the same calendar day, as `YYYY-MM-DD`.
    ///
    /// A 29 February issue rolls over to 1 March when the target year has no
    /// leap day.
    pub fn calculate_expiry(issue_date: &str) -> Result<String, FormError> {
        let issued = Self::parse_date(issue_date)?;
        let expiry = Self::add_years(issued, VALIDITY_YEARS)
            .ok_or_else(|| FormError::InvalidDate(format!("no expiry date for {}", issue_date)))?;
        Ok(expiry.format(ISO_DATE).to_string())
    }

    fn add_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
        let year = date.year() + years;
        NaiveDate::from_ymd_opt(year, date.month(), date.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, date.month() + 1, 1))
    }

    // Parse a date string in the format "YYYY-MM-DD"
    pub fn parse_date(date_str: &str) -> Result<NaiveDate, FormError> {
        NaiveDate::parse_from_str(date_str.trim(), ISO_DATE)
            .map_err(|e| FormError::InvalidDate(format!("{}: {}", date_str, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, ISO_DATE).unwrap()
    }

    #[test]
    fn test_age_birthday_boundary() {
        let dob = date("2000-06-15");
        assert_eq!(DerivedFieldCalculator::calculate_age(dob, date("2024-06-14")), 23);
        assert_eq!(DerivedFieldCalculator::calculate_age(dob, date("2024-06-15")), 24);
        assert_eq!(DerivedFieldCalculator::calculate_age(dob, date("2024-05-30")), 23);
    }

    #[test]
    fn test_age_never_increases_going_backwards() {
        let dob = date("1987-02-28");
        let mut today = date("2025-03-10");
        let mut last = DerivedFieldCalculator::calculate_age(dob, today);
        for _ in 0..800 {
            today = today.pred_opt().unwrap();
            let age = DerivedFieldCalculator::calculate_age(dob, today);
            assert!(age <= last);
            last = age;
        }
    }

    #[test]
    fn test_expiry_is_ten_years_later() {
        assert_eq!(DerivedFieldCalculator::calculate_expiry("2020-01-01").unwrap(), "2030-01-01");
        assert_eq!(DerivedFieldCalculator::calculate_expiry("2019-12-31").unwrap(), "2029-12-31");
    }

    #[test]
    fn test_expiry_leap_day_rolls_over() {
        assert_eq!(DerivedFieldCalculator::calculate_expiry("2024-02-29").unwrap(), "2034-03-01");
        assert_eq!(DerivedFieldCalculator::calculate_expiry("2016-02-29").unwrap(), "2026-03-01");
    }

    #[test]
    fn test_invalid_dates_are_rejected() {
        assert!(matches!(
            DerivedFieldCalculator::calculate_expiry("2020-13-01"),
            Err(FormError::InvalidDate(_))
        ));
        assert!(DerivedFieldCalculator::age_on_today("").is_err());
    }
}
