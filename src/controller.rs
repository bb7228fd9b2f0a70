//! Form submission controller.
//!
//! Wires UI events to the validators, the derived-field calculator and the
//! remote endpoint. Every handler takes `&self`, so keystroke duplicate
//! checks and a submission may be in flight at the same time; the view lock
//! is only ever held for synchronous UI updates.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, error, info, warn};

use crate::models::{
    FieldId, FormRecord, FormRules, PassportStatus, SubmissionOutcome, SubmissionState, SubmitReply,
};
use crate::processing::{DerivedFieldCalculator, ReferenceData};
use crate::remote::RegistryEndpoint;
use crate::utils::FormError;
use crate::validation::format::DUPLICATE_PASSPORT_MESSAGE;
use crate::validation::required::REQUIRED_FIELD_MESSAGE;
use crate::validation::{CheckResult, DuplicateChecker, FieldValidator, RequiredFieldValidator};
use crate::view::{FormView, ThankYou};

pub const DUPLICATE_SUBMISSION_MESSAGE: &str = "Duplicate Passport Number!";
pub const GENERIC_FAILURE_MESSAGE: &str = "Oops! Something went wrong. Please try again.";

pub struct FormController<E, V> {
    endpoint: E,
    view: Mutex<V>,
    rules: FormRules,
    duplicates: DuplicateChecker,
    reference: Mutex<ReferenceData>,
    state: Mutex<SubmissionState>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<E: RegistryEndpoint, V: FormView> FormController<E, V> {
    pub fn new(endpoint: E, view: V) -> Self {
        FormController {
            endpoint,
            view: Mutex::new(view),
            rules: FormRules::default(),
            duplicates: DuplicateChecker::new(),
            reference: Mutex::new(ReferenceData::default()),
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn with_rules(mut self, rules: FormRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Lock the view for inspection or direct updates. Do not hold the
    /// guard across an await.
    pub fn view(&self) -> MutexGuard<'_, V> {
        lock(&self.view)
    }

    pub fn state(&self) -> SubmissionState {
        *lock(&self.state)
    }

    fn set_state(&self, next: SubmissionState) {
        let mut state = lock(&self.state);
        debug!("Submission state {:?} -> {:?}", *state, next);
        *state = next;
    }

    fn read_field(&self, field: FieldId) -> String {
        self.view().field_value(field.name()).unwrap_or_default()
    }

    // -- Derived fields ------------------------------------------------------

    /// `dateOfBirth` changed: refresh `age`. An unreadable date clears it.
    pub fn on_date_of_birth_change(&self) -> Option<i32> {
        let dob = self.read_field(FieldId::DateOfBirth);
        let age = match DerivedFieldCalculator::age_on_today(&dob) {
            Ok(age) => Some(age),
            Err(e) => {
                debug!("Cannot derive age: {}", e);
                None
            }
        };

        let text = age.map(|age| age.to_string()).unwrap_or_default();
        self.view().set_field_value(FieldId::Age.name(), &text);
        age
    }

    /// `issueDate` changed: refresh `expiryDate`. An unreadable date clears it.
    pub fn on_issue_date_change(&self) -> Option<String> {
        let issued = self.read_field(FieldId::IssueDate);
        let expiry = match DerivedFieldCalculator::calculate_expiry(&issued) {
            Ok(expiry) => Some(expiry),
            Err(e) => {
                debug!("Cannot derive expiry: {}", e);
                None
            }
        };

        self.view()
            .set_field_value(FieldId::ExpiryDate.name(), expiry.as_deref().unwrap_or_default());
        expiry
    }

    // -- Field validation ----------------------------------------------------

    /// Passport input event. Returns `None` when a newer check superseded
    /// this one and the UI was left alone. A superseded check still reports
    /// a bad format while the field holds the value it checked, since that
    /// verdict never depended on the endpoint.
    pub async fn on_passport_input(&self) -> Option<PassportStatus> {
        let passport_number = self.read_field(FieldId::PassportNumber);
        let format_ok = FieldValidator::validate_passport_number(&passport_number);

        let is_duplicate = match self.duplicates.check(&self.endpoint, &passport_number).await {
            Ok(CheckResult::Current(is_duplicate)) => is_duplicate,
            Ok(CheckResult::Superseded) => {
                if format_ok || self.read_field(FieldId::PassportNumber) != passport_number {
                    return None;
                }
                false
            }
            Err(_) => false,
        };

        let status = PassportStatus::merge(format_ok, is_duplicate);

        let mut view = self.view();
        match FieldValidator::passport_message(status) {
            Some(message) => view.show_field_error(FieldId::PassportNumber.name(), message),
            None => view.clear_field_error(FieldId::PassportNumber.name()),
        }
        Some(status)
    }

    /// Mobile input event. Returns whether the number is well formed.
    pub fn on_mobile_input(&self) -> bool {
        let mobile_number = self.read_field(FieldId::MobileNumber);
        let message = FieldValidator::mobile_message(&mobile_number);

        let mut view = self.view();
        match message {
            Some(message) => view.show_field_error(FieldId::MobileNumber.name(), message),
            None => view.clear_field_error(FieldId::MobileNumber.name()),
        }
        message.is_none()
    }

    // -- Reference data ------------------------------------------------------

    /// Fetch the company list once and fill the dropdown.
    pub async fn load_companies(&self) -> Result<usize, FormError> {
        let data = self.endpoint.company_data().await?;
        info!("Loaded {} companies", data.len());

        self.view().set_company_options(&data.names());
        let count = data.len();
        *lock(&self.reference) = data;
        Ok(count)
    }

    /// Company dropdown changed: copy the matching customer code across.
    /// Unknown names leave `customerCode` untouched.
    pub fn on_company_selected(&self) -> Option<String> {
        let company_name = self.read_field(FieldId::CompanyName);
        let code = lock(&self.reference).find_code(&company_name).map(str::to_string);

        match &code {
            Some(code) => {
                debug!("Company {} -> customer code {}", company_name, code);
                self.view().set_field_value(FieldId::CustomerCode.name(), code);
            }
            None => debug!("No customer code for company {:?}", company_name),
        }
        code
    }

    pub fn companies(&self) -> ReferenceData {
        lock(&self.reference).clone()
    }

    // -- Submission ----------------------------------------------------------

    /// Form submit event.
    pub async fn submit(&self) -> SubmissionOutcome {
        let outcome = self.run_submission().await;

        {
            let mut view = self.view();
            view.set_submit_enabled(true);
            view.set_spinner_visible(false);
        }

        info!("Submission finished: {:?}", outcome);
        self.set_state(SubmissionState::Idle);
        outcome
    }

    async fn run_submission(&self) -> SubmissionOutcome {
        let record = FormRecord::from_entries(self.view().form_entries()).normalized();

        {
            let mut view = self.view();
            view.set_loading_visible(true);
            view.set_inputs_visible(false);
            view.hide_error_banner();
        }
        self.set_state(SubmissionState::Checking);

        let passport_number = record.field(FieldId::PassportNumber).unwrap_or_default();
        let duplicate = self
            .duplicates
            .check_authoritative(&self.endpoint, passport_number)
            .await;
        self.view().set_loading_visible(false);

        match duplicate {
            Ok(false) => {}
            Ok(true) => {
                warn!("Blocked submission of duplicate passport {}", passport_number);
                self.set_state(SubmissionState::Blocked);
                let mut view = self.view();
                view.show_error_banner(DUPLICATE_SUBMISSION_MESSAGE);
                view.set_field_highlight(FieldId::PassportNumber.name(), true);
                view.set_inputs_visible(true);
                view.set_thank_you(ThankYou::Hidden);
                return SubmissionOutcome::Duplicate;
            }
            Err(e) => return self.fail_transport(&e),
        }

        self.set_state(SubmissionState::Validating);
        let required = RequiredFieldValidator::validate(&record, &self.rules);
        {
            let mut view = self.view();
            for field in &required.missing {
                view.show_field_error(field, REQUIRED_FIELD_MESSAGE);
            }
            for field in &required.passed {
                view.clear_field_error(field);
            }
            if !required.is_valid {
                view.set_inputs_visible(true);
            }
        }
        if !required.is_valid {
            debug!("Missing required fields: {:?}", required.missing);
            return SubmissionOutcome::MissingRequired(required.missing);
        }

        self.set_state(SubmissionState::Submitting);
        {
            let mut view = self.view();
            view.set_thank_you(ThankYou::Pending);
            view.set_submit_enabled(false);
            view.set_spinner_visible(true);
        }

        match self.endpoint.submit(&record).await {
            Ok(SubmitReply::Success) => {
                self.set_state(SubmissionState::Success);
                let mut view = self.view();
                view.set_thank_you(ThankYou::Confirmed);
                view.hide_error_banner();
                view.set_input_container_visible(true);
                SubmissionOutcome::Submitted
            }
            Ok(SubmitReply::Error { error: message }) => {
                error!("Error saving data: {}", message);
                self.set_state(SubmissionState::Failed);
                let mut view = self.view();
                view.show_error_banner(&message);
                view.set_thank_you(ThankYou::Hidden);
                view.set_inputs_visible(true);
                SubmissionOutcome::Rejected(message)
            }
            Err(e) => self.fail_transport(&e),
        }
    }

    fn fail_transport(&self, err: &FormError) -> SubmissionOutcome {
        error!("Error: {}", err);
        self.set_state(SubmissionState::Failed);
        let mut view = self.view();
        view.show_page_error(GENERIC_FAILURE_MESSAGE);
        view.set_inputs_visible(true);
        SubmissionOutcome::TransportFailed
    }
}
