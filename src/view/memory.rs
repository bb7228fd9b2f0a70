use std::collections::{BTreeSet, HashMap};

use crate::view::dom::{self, error_element_id};
use crate::view::{FormView, ThankYou};

/// A `FormView` that keeps the page state in memory.
///
/// Elements are tracked by id with their text and class list, so the same
/// `hidden` / `validation-error-style` / `highlight-error` bookkeeping a
/// browser page does can be asserted on directly.
#[derive(Debug, Clone)]
pub struct MemoryView {
    fields: Vec<(String, String)>,
    texts: HashMap<String, String>,
    classes: HashMap<String, BTreeSet<String>>,
    inputs_visible: bool,
    thank_you: ThankYou,
    submit_enabled: bool,
    company_options: Vec<String>,
}

impl Default for MemoryView {
    fn default() -> Self {
        let mut view = MemoryView {
            fields: Vec::new(),
            texts: HashMap::new(),
            classes: HashMap::new(),
            inputs_visible: true,
            thank_you: ThankYou::Hidden,
            submit_enabled: true,
            company_options: Vec::new(),
        };
        for element in [dom::LOADING_ANIMATION, dom::ERROR_MESSAGE, dom::SPINNER] {
            view.add_class(element, dom::HIDDEN_CLASS);
        }
        view
    }
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut view = Self::default();
        for (name, value) in entries {
            view.set_field_value(&name.into(), &value.into());
        }
        view
    }

    pub fn has_class(&self, element: &str, class: &str) -> bool {
        self.classes
            .get(element)
            .map_or(false, |classes| classes.contains(class))
    }

    pub fn text(&self, element: &str) -> Option<&str> {
        self.texts.get(element).map(String::as_str)
    }

    /// Inline error currently shown for `field`, if any.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        let error_id = error_element_id(field);
        if self.has_class(&error_id, dom::HIDDEN_CLASS) {
            return None;
        }
        self.text(&error_id).filter(|text| !text.is_empty())
    }

    pub fn is_flagged(&self, field: &str) -> bool {
        self.has_class(field, dom::VALIDATION_ERROR_CLASS)
    }

    pub fn is_highlighted(&self, field: &str) -> bool {
        self.has_class(field, dom::HIGHLIGHT_ERROR_CLASS)
    }

    pub fn error_banner(&self) -> Option<&str> {
        if self.is_shown(dom::ERROR_MESSAGE) {
            self.text(dom::ERROR_TEXT)
        } else {
            None
        }
    }

    pub fn page_error(&self) -> Option<&str> {
        self.field_error(dom::PAGE_BODY)
    }

    pub fn inputs_visible(&self) -> bool {
        self.inputs_visible
    }

    pub fn input_container_visible(&self) -> bool {
        self.is_shown(dom::FORM_INPUTS)
    }

    pub fn loading_visible(&self) -> bool {
        self.is_shown(dom::LOADING_ANIMATION)
    }

    pub fn thank_you(&self) -> ThankYou {
        self.thank_you
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn spinner_visible(&self) -> bool {
        self.is_shown(dom::SPINNER)
    }

    pub fn company_options(&self) -> &[String] {
        &self.company_options
    }

    fn is_shown(&self, element: &str) -> bool {
        !self.has_class(element, dom::HIDDEN_CLASS)
    }

    fn set_shown(&mut self, element: &str, shown: bool) {
        if shown {
            self.remove_class(element, dom::HIDDEN_CLASS);
        } else {
            self.add_class(element, dom::HIDDEN_CLASS);
        }
    }

    fn add_class(&mut self, element: &str, class: &str) {
        self.classes
            .entry(element.to_string())
            .or_default()
            .insert(class.to_string());
    }

    fn remove_class(&mut self, element: &str, class: &str) {
        if let Some(classes) = self.classes.get_mut(element) {
            classes.remove(class);
        }
    }
}

impl FormView for MemoryView {
    fn form_entries(&self) -> Vec<(String, String)> {
        self.fields.clone()
    }

    fn field_value(&self, field: &str) -> Option<String> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.clone())
    }

    fn set_field_value(&mut self, field: &str, value: &str) {
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.fields.push((field.to_string(), value.to_string())),
        }
    }

    fn show_field_error(&mut self, field: &str, message: &str) {
        let error_id = error_element_id(field);
        self.texts.insert(error_id.clone(), message.to_string());
        self.remove_class(&error_id, dom::HIDDEN_CLASS);
        self.add_class(field, dom::VALIDATION_ERROR_CLASS);
    }

    fn clear_field_error(&mut self, field: &str) {
        let error_id = error_element_id(field);
        self.texts.insert(error_id.clone(), String::new());
        self.add_class(&error_id, dom::HIDDEN_CLASS);
        self.remove_class(field, dom::VALIDATION_ERROR_CLASS);
    }

    fn set_field_highlight(&mut self, field: &str, highlighted: bool) {
        if highlighted {
            self.add_class(field, dom::HIGHLIGHT_ERROR_CLASS);
        } else {
            self.remove_class(field, dom::HIGHLIGHT_ERROR_CLASS);
        }
    }

    fn set_inputs_visible(&mut self, visible: bool) {
        self.inputs_visible = visible;
    }

    fn set_input_container_visible(&mut self, visible: bool) {
        self.set_shown(dom::FORM_INPUTS, visible);
    }

    fn set_loading_visible(&mut self, visible: bool) {
        self.set_shown(dom::LOADING_ANIMATION, visible);
    }

    fn show_error_banner(&mut self, message: &str) {
        self.texts.insert(dom::ERROR_TEXT.to_string(), message.to_string());
        self.set_shown(dom::ERROR_MESSAGE, true);
    }

    fn hide_error_banner(&mut self) {
        self.set_shown(dom::ERROR_MESSAGE, false);
    }

    fn set_thank_you(&mut self, thank_you: ThankYou) {
        self.thank_you = thank_you;
    }

    fn show_page_error(&mut self, message: &str) {
        self.show_field_error(dom::PAGE_BODY, message);
    }

    fn set_submit_enabled(&mut self, enabled: bool) {
        self.submit_enabled = enabled;
    }

    fn set_spinner_visible(&mut self, visible: bool) {
        self.set_shown(dom::SPINNER, visible);
    }

    fn set_company_options(&mut self, names: &[String]) {
        self.company_options = names.to_vec();
    }
}
