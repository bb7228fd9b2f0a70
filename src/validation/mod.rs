pub mod duplicate;
pub mod format;
pub mod required;

pub use duplicate::{CheckResult, CheckTicket, DuplicateChecker};
pub use format::FieldValidator;
pub use required::{RequiredFieldResult, RequiredFieldValidator};
