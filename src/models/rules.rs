use crate::models::{FieldId, FormRecord};

/// Which inputs must carry a value before a record is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRules {
    pub required_fields: Vec<String>,
}

impl Default for FormRules {
    fn default() -> Self {
        let required_fields = [
            FieldId::DateOfBirth,
            FieldId::IssueDate,
            FieldId::PassportNumber,
            FieldId::MobileNumber,
            FieldId::CompanyName,
            FieldId::CustomerCode,
        ]
        .iter()
        .map(|field| field.name().to_string())
        .collect();

        FormRules { required_fields }
    }
}

impl FormRules {
    pub fn new(required_fields: Vec<String>) -> Self {
        FormRules { required_fields }
    }

    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.is_required(&name) {
            self.required_fields.push(name);
        }
        self
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required_fields.iter().any(|field| field == name)
    }

    /// Required fields that are absent or empty in `record`, in rule order.
    pub fn missing_fields(&self, record: &FormRecord) -> Vec<String> {
        self.required_fields
            .iter()
            .filter(|name| record.get(name).map_or(true, str::is_empty))
            .cloned()
            .collect()
    }
}
