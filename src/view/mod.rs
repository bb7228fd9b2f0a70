//! UI capability the controller drives.
//!
//! The controller never touches markup directly. A browser binding, a
//! terminal front-end or [`MemoryView`] implements [`FormView`] against the
//! element ids and classes listed in [`dom`].

pub mod memory;

pub use memory::MemoryView;

/// Element ids and CSS classes the page is expected to provide.
pub mod dom {
    pub const FORM_INPUTS: &str = "formInputs";
    pub const ERROR_MESSAGE: &str = "error-message";
    pub const ERROR_TEXT: &str = "error-text";
    pub const SPINNER: &str = "spinner";
    pub const LOADING_ANIMATION: &str = "loading-animation";
    pub const PAGE_BODY: &str = "body";

    pub const HIDDEN_CLASS: &str = "hidden";
    pub const VALIDATION_ERROR_CLASS: &str = "validation-error-style";
    pub const HIGHLIGHT_ERROR_CLASS: &str = "highlight-error";

    /// Id of the inline error element paired with an input.
    pub fn error_element_id(field: &str) -> String {
        format!("{}Error", field)
    }
}

/// Contents of the thank-you area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThankYou {
    Hidden,
    /// Shown while the record is on its way.
    Pending,
    /// Success banner after the endpoint accepted the record.
    Confirmed,
}

pub trait FormView: Send {
    /// `(name, value)` pairs of every submittable input, in form order.
    fn form_entries(&self) -> Vec<(String, String)>;

    fn field_value(&self, field: &str) -> Option<String>;

    fn set_field_value(&mut self, field: &str, value: &str);

    /// Show `message` in the field's error element and flag the input.
    fn show_field_error(&mut self, field: &str, message: &str);

    fn clear_field_error(&mut self, field: &str);

    fn set_field_highlight(&mut self, field: &str, highlighted: bool);

    /// Visibility of the individual inputs, labels and headings inside the
    /// form input container.
    fn set_inputs_visible(&mut self, visible: bool);

    /// Visibility of the form input container itself.
    fn set_input_container_visible(&mut self, visible: bool);

    fn set_loading_visible(&mut self, visible: bool);

    fn show_error_banner(&mut self, message: &str);

    fn hide_error_banner(&mut self);

    fn set_thank_you(&mut self, thank_you: ThankYou);

    /// Error attached to the page as a whole rather than a field.
    fn show_page_error(&mut self, message: &str);

    fn set_submit_enabled(&mut self, enabled: bool);

    fn set_spinner_visible(&mut self, visible: bool);

    /// Replace the company dropdown options.
    fn set_company_options(&mut self, names: &[String]);
}
