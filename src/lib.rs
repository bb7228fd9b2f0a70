pub mod controller;
pub mod models;
pub mod processing;
pub mod remote;
pub mod utils;
pub mod validation;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::FormController;
pub use remote::{EndpointConfig, RegistryEndpoint, ScriptClient};
pub use utils::FormError;
pub use view::{FormView, MemoryView};
