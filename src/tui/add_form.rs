//! Add-task form for the terminal user interface.

use crate::tui::{enums::FormField, input::InputField};

/// The three inputs of the add-task popup.
#[derive(Clone, Debug)]
pub struct AddForm {
    pub text: InputField,
    pub tag: InputField,
    pub due: InputField,
    pub current_field: FormField,
}

impl Default for AddForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AddForm {
    pub fn new() -> Self {
        Self {
            text: InputField::new(),
            tag: InputField::new(),
            due: InputField::new(),
            current_field: FormField::Text,
        }
    }

    pub fn field(&self, field: FormField) -> &InputField {
        match field {
            FormField::Text => &self.text,
            FormField::Tag => &self.tag,
            FormField::Due => &self.due,
        }
    }

    /// The input receiving keystrokes.
    pub fn active_mut(&mut self) -> &mut InputField {
        match self.current_field {
            FormField::Text => &mut self.text,
            FormField::Tag => &mut self.tag,
            FormField::Due => &mut self.due,
        }
    }

    pub fn next_field(&mut self) {
        self.current_field = self.current_field.next();
    }

    pub fn prev_field(&mut self) {
        self.current_field = self.current_field.prev();
    }

    /// Empty every input and return focus to the text field.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
