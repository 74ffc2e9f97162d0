//! Enumerations for TUI state management.

/// What the board is currently accepting keys for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Board,
    AddTask,
    FilterText,
    FilterTag,
    ConfirmDelete,
    Help,
}

/// Fields of the add-task form, in tab order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FormField {
    Text,
    Tag,
    Due,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Text => FormField::Tag,
            FormField::Tag => FormField::Due,
            FormField::Due => FormField::Text,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Text => FormField::Due,
            FormField::Tag => FormField::Text,
            FormField::Due => FormField::Tag,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Text => "Task",
            FormField::Tag => "Tag",
            FormField::Due => "Due",
        }
    }
}
