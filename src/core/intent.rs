use super::theme::{Palette, Theme};
use crate::transfer::json::Imported;

/// Field of the add-goal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    DueDate,
}

/// Everything a view can ask the goal collection to do. Views only produce
/// intents; the controller is the sole writer of state.
#[derive(Debug, Clone)]
pub enum Intent {
    // Add form
    ToggleAddForm,
    FormInput(FormField, String),
    SubmitAddForm,

    // Cards
    ToggleCompleted(usize),
    RequestDelete { index: usize, title: String },
    ConfirmDelete,
    CancelDelete,
    RequestDeleteAll,
    ConfirmDeleteAll,
    CancelDeleteAll,

    // Theme
    SetTheme(Theme),
    ToggleDarkMode,
    ChangePalette(Palette),

    // Import / export
    ExportDocument,
    ExportCalendar,
    ImportFinished(Result<Imported, String>),
}
