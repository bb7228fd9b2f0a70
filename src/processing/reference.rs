use serde_json::Value;

use crate::models::CompanyEntry;
use crate::utils::FormError;

/// Company list backing the company dropdown, in spreadsheet order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    companies: Vec<CompanyEntry>,
}

impl ReferenceData {
    pub fn new(companies: Vec<CompanyEntry>) -> Self {
        ReferenceData { companies }
    }

    /// Convert the `[[companyName, customerCode], ...]` rows returned by the
    /// endpoint. Spreadsheet cells may come back as numbers, so any scalar is
    /// accepted and rendered as text.
    pub fn from_rows(rows: Vec<Vec<Value>>) -> Result<Self, FormError> {
        let companies = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| match row.as_slice() {
                [name, code, ..] => Ok(CompanyEntry::new(cell_text(name), cell_text(code))),
                _ => Err(FormError::ReferenceData(format!(
                    "row {} has {} cells, expected 2",
                    index,
                    row.len()
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ReferenceData { companies })
    }

    pub fn companies(&self) -> &[CompanyEntry] {
        &self.companies
    }

    pub fn names(&self) -> Vec<String> {
        self.companies
            .iter()
            .map(|company| company.company_name.clone())
            .collect()
    }

    /// First matching entry wins when a name appears twice.
    pub fn find_code(&self, company_name: &str) -> Option<&str> {
        self.companies
            .iter()
            .find(|company| company.company_name == company_name)
            .map(|company| company.customer_code.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
