//! Remote registration endpoint.
//!
//! | Purpose | Query parameters | Reply |
//! |---------|------------------|-------|
//! | Duplicate check | `action=checkDuplicate&passportNumber=<value>` | `{"isDuplicate": bool}` |
//! | Reference data | `action=getCompanyData` | `[[companyName, customerCode], ...]` |
//! | Submit record | `data=<JSON of the record>` | `{"result": "success"}` or `{"result": "error", "error": "..."}` |

pub mod client;
pub mod config;

pub use client::ScriptClient;
pub use config::EndpointConfig;

use std::future::Future;

use crate::models::{FormRecord, SubmitReply};
use crate::processing::ReferenceData;
use crate::utils::FormError;

/// The three calls the form makes against its backend.
pub trait RegistryEndpoint: Send + Sync {
    /// `true` when the passport number is already registered.
    fn check_duplicate(
        &self,
        passport_number: &str,
    ) -> impl Future<Output = Result<bool, FormError>> + Send;

    fn company_data(&self) -> impl Future<Output = Result<ReferenceData, FormError>> + Send;

    fn submit(
        &self,
        record: &FormRecord,
    ) -> impl Future<Output = Result<SubmitReply, FormError>> + Send;
}
