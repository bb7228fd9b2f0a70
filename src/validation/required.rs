use crate::models::{FormRecord, FormRules};

pub const REQUIRED_FIELD_MESSAGE: &str = "This field is required.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFieldResult {
    pub is_valid: bool,
    /// Required fields with no value, in rule order.
    pub missing: Vec<String>,
    /// Every field the record carries that passed, required or not. Stale
    /// errors on these are cleared.
    pub passed: Vec<String>,
}

pub struct RequiredFieldValidator;

impl RequiredFieldValidator {
    pub fn validate(record: &FormRecord, rules: &FormRules) -> RequiredFieldResult {
        let missing = rules.missing_fields(record);
        let passed = record
            .field_names()
            .into_iter()
            .filter(|name| !missing.contains(name))
            .collect();

        RequiredFieldResult {
            is_valid: missing.is_empty(),
            missing,
            passed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_present() {
        let rules = FormRules::new(vec!["passportNumber".into(), "companyName".into()]);
        let record = FormRecord::from_entries([("passportNumber", "N1234567"), ("companyName", "ACME")]);

        let result = RequiredFieldValidator::validate(&record, &rules);
        assert!(result.is_valid);
        assert!(result.missing.is_empty());
        assert_eq!(result.passed, vec!["passportNumber", "companyName"]);
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let rules = FormRules::default();
        let record = FormRecord::from_entries([
            ("dateOfBirth", "2000-06-15"),
            ("issueDate", "2020-01-01"),
            ("passportNumber", "N1234567"),
            ("mobileNumber", ""),
            ("companyName", "ACME"),
        ]);

        let result = RequiredFieldValidator::validate(&record, &rules);
        assert!(!result.is_valid);
        assert_eq!(result.missing, vec!["mobileNumber", "customerCode"]);
        assert!(result.passed.contains(&"passportNumber".to_string()));
        assert!(!result.passed.contains(&"mobileNumber".to_string()));
    }

    #[test]
    fn test_optional_fields_count_as_passed() {
        let rules = FormRules::new(vec!["passportNumber".into()]);
        let record = FormRecord::from_entries([
            ("passportNumber", "N1234567"),
            ("mobileNumber", ""),
            ("nickname", "JJ"),
        ]);

        let result = RequiredFieldValidator::validate(&record, &rules);
        assert!(result.is_valid);
        assert_eq!(result.passed, vec!["passportNumber", "mobileNumber", "nickname"]);
    }
}
