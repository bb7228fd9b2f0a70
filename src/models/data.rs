use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Form fields the controller reads or writes by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    DateOfBirth,
    Age,
    IssueDate,
    ExpiryDate,
    PassportNumber,
    MobileNumber,
    CompanyName,
    CustomerCode,
    AdditionalParticipants,
}

impl FieldId {
    pub const ALL: [FieldId; 9] = [
        FieldId::DateOfBirth,
        FieldId::Age,
        FieldId::IssueDate,
        FieldId::ExpiryDate,
        FieldId::PassportNumber,
        FieldId::MobileNumber,
        FieldId::CompanyName,
        FieldId::CustomerCode,
        FieldId::AdditionalParticipants,
    ];

    /// Element id and form-data key.
    pub fn name(&self) -> &'static str {
        match self {
            FieldId::DateOfBirth => "dateOfBirth",
            FieldId::Age => "age",
            FieldId::IssueDate => "issueDate",
            FieldId::ExpiryDate => "expiryDate",
            FieldId::PassportNumber => "passportNumber",
            FieldId::MobileNumber => "mobileNumber",
            FieldId::CompanyName => "companyName",
            FieldId::CustomerCode => "customerCode",
            FieldId::AdditionalParticipants => "additionalParticipants",
        }
    }

    pub fn from_name(name: &str) -> Option<FieldId> {
        FieldId::ALL.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One submission attempt's worth of form data.
///
/// Known fields are `None` when the form did not carry them at all (an
/// unchecked radio group, for instance) and `Some("")` when the input was
/// present but empty. Anything the controller does not know by name lands
/// in `extra` and is still transmitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_participants: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

impl FormRecord {
    /// Build a record from `(name, value)` pairs in form order. A repeated
    /// name keeps its first position and its last value.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = FormRecord::default();
        for (name, value) in entries {
            record.set(&name.into(), value.into());
        }
        record
    }

    pub fn set(&mut self, name: &str, value: String) {
        match FieldId::from_name(name) {
            Some(field) => *self.slot_mut(field) = Some(value),
            None => {
                self.extra.insert(name.to_string(), value);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        match FieldId::from_name(name) {
            Some(field) => self.field(field),
            None => self.extra.get(name).map(String::as_str),
        }
    }

    pub fn field(&self, field: FieldId) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Names of every field the record carries, known fields first.
    pub fn field_names(&self) -> Vec<String> {
        FieldId::ALL
            .into_iter()
            .filter(|field| self.slot(*field).is_some())
            .map(|field| field.name().to_string())
            .chain(self.extra.keys().cloned())
            .collect()
    }

    /// Uppercases every value, named and extra alike.
    pub fn normalize(&mut self) {
        for field in FieldId::ALL {
            if let Some(value) = self.slot_mut(field) {
                *value = value.to_uppercase();
            }
        }
        for value in self.extra.values_mut() {
            *value = value.to_uppercase();
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    fn slot(&self, field: FieldId) -> &Option<String> {
        match field {
            FieldId::DateOfBirth => &self.date_of_birth,
            FieldId::Age => &self.age,
            FieldId::IssueDate => &self.issue_date,
            FieldId::ExpiryDate => &self.expiry_date,
            FieldId::PassportNumber => &self.passport_number,
            FieldId::MobileNumber => &self.mobile_number,
            FieldId::CompanyName => &self.company_name,
            FieldId::CustomerCode => &self.customer_code,
            FieldId::AdditionalParticipants => &self.additional_participants,
        }
    }

    fn slot_mut(&mut self, field: FieldId) -> &mut Option<String> {
        match field {
            FieldId::DateOfBirth => &mut self.date_of_birth,
            FieldId::Age => &mut self.age,
            FieldId::IssueDate => &mut self.issue_date,
            FieldId::ExpiryDate => &mut self.expiry_date,
            FieldId::PassportNumber => &mut self.passport_number,
            FieldId::MobileNumber => &mut self.mobile_number,
            FieldId::CompanyName => &mut self.company_name,
            FieldId::CustomerCode => &mut self.customer_code,
            FieldId::AdditionalParticipants => &mut self.additional_participants,
        }
    }
}

/// A company and the customer code filled in when it is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyEntry {
    pub company_name: String,
    pub customer_code: String,
}

impl CompanyEntry {
    pub fn new(company_name: impl Into<String>, customer_code: impl Into<String>) -> Self {
        CompanyEntry {
            company_name: company_name.into(),
            customer_code: customer_code.into(),
        }
    }
}

/// Reply to a `checkDuplicate` query.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateReply {
    pub is_duplicate: bool,
}

/// Reply to a record submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum SubmitReply {
    Success,
    Error {
        #[serde(default)]
        error: String,
    },
}

/// Merged verdict shown next to the passport field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassportStatus {
    Valid,
    InvalidFormat,
    Duplicate,
}

impl PassportStatus {
    /// Format problems are reported before duplicates.
    pub fn merge(format_ok: bool, is_duplicate: bool) -> Self {
        if !format_ok {
            PassportStatus::InvalidFormat
        } else if is_duplicate {
            PassportStatus::Duplicate
        } else {
            PassportStatus::Valid
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Checking,
    Blocked,
    Validating,
    Submitting,
    Success,
    Failed,
}

/// How a submit attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Submitted,
    Duplicate,
    MissingRequired(Vec<String>),
    Rejected(String),
    TransportFailed,
}

impl SubmissionOutcome {
    pub fn was_sent(&self) -> bool {
        matches!(
            self,
            SubmissionOutcome::Submitted
                | SubmissionOutcome::Rejected(_)
                | SubmissionOutcome::TransportFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_splits_known_and_extra() {
        let record = FormRecord::from_entries([
            ("passportNumber", "n1234567"),
            ("fullName", "Jane Perera"),
            ("mobileNumber", "0711234567"),
        ]);

        assert_eq!(record.passport_number.as_deref(), Some("n1234567"));
        assert_eq!(record.get("fullName"), Some("Jane Perera"));
        assert_eq!(record.field(FieldId::MobileNumber), Some("0711234567"));
        assert_eq!(record.field(FieldId::Age), None);
    }

    #[test]
    fn test_normalize_uppercases_everything() {
        let record = FormRecord::from_entries([
            ("passportNumber", "n1234567"),
            ("companyName", "acme lanka"),
            ("address", "12 galle road"),
        ])
        .normalized();

        assert_eq!(record.get("passportNumber"), Some("N1234567"));
        assert_eq!(record.get("companyName"), Some("ACME LANKA"));
        assert_eq!(record.get("address"), Some("12 GALLE ROAD"));
    }

    #[test]
    fn test_json_is_flat_and_camel_case() {
        let record = FormRecord::from_entries([
            ("dateOfBirth", "2000-06-15"),
            ("customerCode", "C-01"),
            ("fullName", "JANE"),
        ]);
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "dateOfBirth": "2000-06-15",
                "customerCode": "C-01",
                "fullName": "JANE"
            })
        );
    }

    #[test]
    fn test_extra_fields_keep_form_order() {
        let record = FormRecord::from_entries([
            ("surname", "PERERA"),
            ("address", "GALLE ROAD"),
            ("passportNumber", "N1234567"),
            ("emergencyContact", "0771234567"),
            ("address", "KANDY ROAD"),
        ]);

        assert_eq!(
            record.to_json().unwrap(),
            r#"{"passportNumber":"N1234567","surname":"PERERA","address":"KANDY ROAD","emergencyContact":"0771234567"}"#
        );
        assert_eq!(
            record.field_names(),
            vec!["passportNumber", "surname", "address", "emergencyContact"]
        );
    }

    #[test]
    fn test_submit_reply_parsing() {
        let ok: SubmitReply = serde_json::from_str(r#"{"result":"success"}"#).unwrap();
        assert_eq!(ok, SubmitReply::Success);

        let err: SubmitReply =
            serde_json::from_str(r#"{"result":"error","error":"Sheet locked"}"#).unwrap();
        assert_eq!(
            err,
            SubmitReply::Error {
                error: "Sheet locked".to_string()
            }
        );

        assert!(serde_json::from_str::<SubmitReply>(r#"{"result":"pending"}"#).is_err());
    }

    #[test]
    fn test_passport_status_merge_prefers_format() {
        assert_eq!(PassportStatus::merge(false, true), PassportStatus::InvalidFormat);
        assert_eq!(PassportStatus::merge(true, true), PassportStatus::Duplicate);
        assert_eq!(PassportStatus::merge(true, false), PassportStatus::Valid);
    }
}
