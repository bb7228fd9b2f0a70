use std::sync::LazyLock;

use regex::Regex;

use crate::models::PassportStatus;

pub const INVALID_PASSPORT_MESSAGE: &str = "Invalid Passport Number Format!";
pub const DUPLICATE_PASSPORT_MESSAGE: &str = "Passport Number is Already exists!";
pub const INVALID_MOBILE_MESSAGE: &str = "Invalid Mobile Number.  Enter 10 digits.";

// One uppercase letter followed by 7 to 9 digits
static PASSPORT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][0-9]{7,9}$").unwrap());

static MOBILE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

pub struct FieldValidator;

impl FieldValidator {
    pub fn validate_passport_number(passport_number: &str) -> bool {
        PASSPORT_REGEX.is_match(passport_number)
    }

    pub fn validate_mobile_number(mobile_number: &str) -> bool {
        MOBILE_REGEX.is_match(mobile_number)
    }

    /// Inline message for a passport verdict, `None` when the field is clean.
    pub fn passport_message(status: PassportStatus) -> Option<&'static str> {
        match status {
            PassportStatus::Valid => None,
            PassportStatus::InvalidFormat => Some(INVALID_PASSPORT_MESSAGE),
            PassportStatus::Duplicate => Some(DUPLICATE_PASSPORT_MESSAGE),
        }
    }

    pub fn mobile_message(mobile_number: &str) -> Option<&'static str> {
        if Self::validate_mobile_number(mobile_number) {
            None
        } else {
            Some(INVALID_MOBILE_MESSAGE)
        }
    }
}
