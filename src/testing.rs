//! In-crate endpoint double for controller and checker tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use crate::models::{CompanyEntry, FormRecord, SubmitReply};
use crate::processing::ReferenceData;
use crate::remote::RegistryEndpoint;
use crate::utils::FormError;

pub struct MockEndpoint {
    duplicates: HashSet<String>,
    delays: HashMap<String, Duration>,
    fail_duplicate_checks: bool,
    companies: Option<Vec<CompanyEntry>>,
    submit_reply: Option<SubmitReply>,
    submit_delay: Option<Duration>,
    duplicate_queries: Mutex<Vec<String>>,
    submissions: Mutex<Vec<FormRecord>>,
}

impl MockEndpoint {
    pub fn new() -> Self {
        MockEndpoint {
            duplicates: HashSet::new(),
            delays: HashMap::new(),
            fail_duplicate_checks: false,
            companies: Some(Vec::new()),
            submit_reply: Some(SubmitReply::Success),
            submit_delay: None,
            duplicate_queries: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub fn with_duplicate(mut self, passport_number: &str) -> Self {
        self.duplicates.insert(passport_number.to_string());
        self
    }

    pub fn with_delay(mut self, passport_number: &str, delay: Duration) -> Self {
        self.delays.insert(passport_number.to_string(), delay);
        self
    }

    pub fn failing_duplicate_checks(mut self) -> Self {
        self.fail_duplicate_checks = true;
        self
    }

    pub fn with_companies(mut self, companies: Vec<CompanyEntry>) -> Self {
        self.companies = Some(companies);
        self
    }

    pub fn failing_company_data(mut self) -> Self {
        self.companies = None;
        self
    }

    pub fn rejecting(mut self, error: &str) -> Self {
        self.submit_reply = Some(SubmitReply::Error {
            error: error.to_string(),
        });
        self
    }

    pub fn failing_submissions(mut self) -> Self {
        self.submit_reply = None;
        self
    }

    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = Some(delay);
        self
    }

    pub fn duplicate_queries(&self) -> Vec<String> {
        self.duplicate_queries.lock().unwrap().clone()
    }

    pub fn submissions(&self) -> Vec<FormRecord> {
        self.submissions.lock().unwrap().clone()
    }

    fn unavailable(endpoint: &str) -> FormError {
        FormError::Api {
            endpoint: endpoint.to_string(),
            status: 503,
            body: "unavailable".to_string(),
        }
    }
}

impl RegistryEndpoint for MockEndpoint {
    async fn check_duplicate(&self, passport_number: &str) -> Result<bool, FormError> {
        self.duplicate_queries
            .lock()
            .unwrap()
            .push(passport_number.to_string());

        if let Some(delay) = self.delays.get(passport_number) {
            tokio::time::sleep(*delay).await;
        }

        if self.fail_duplicate_checks {
            return Err(Self::unavailable("checkDuplicate"));
        }
        Ok(self.duplicates.contains(passport_number))
    }

    async fn company_data(&self) -> Result<ReferenceData, FormError> {
        match &self.companies {
            Some(companies) => Ok(ReferenceData::new(companies.clone())),
            None => Err(Self::unavailable("getCompanyData")),
        }
    }

    async fn submit(&self, record: &FormRecord) -> Result<SubmitReply, FormError> {
        self.submissions.lock().unwrap().push(record.clone());
        if let Some(delay) = self.submit_delay {
            tokio::time::sleep(delay).await;
        }
        self.submit_reply
            .clone()
            .ok_or_else(|| Self::unavailable("submit"))
    }
}
