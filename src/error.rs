//! Error taxonomy for goal collection operations.
//!
//! Every variant is recoverable: the controller turns errors into notices for
//! the user and the application keeps running.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoalError {
    /// Required add-form fields were blank after trimming.
    #[error("Please fill in all fields:\n{}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    /// The add-form due date is not a real `YYYY-MM-DD` date.
    #[error("Due date \"{0}\" is not a valid date. Use the YYYY-MM-DD format.")]
    InvalidDueDate(String),

    /// The import file was refused on name, size, type or document shape.
    #[error("{0}")]
    ImportRejected(String),

    /// The import file was not parseable JSON.
    #[error("JSON file is invalid or corrupted.")]
    ParseFailure,

    #[error("Error reading file.")]
    Read(#[source] std::io::Error),

    /// Writing to the record store failed; in-memory state is now ahead of disk.
    #[error("{0}")]
    Persistence(String),

    #[error("No goals to export.")]
    NothingToExport,

    #[error("No valid goals to export.")]
    NoValidCards,
}

pub type Result<T> = std::result::Result<T, GoalError>;

impl GoalError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::ImportRejected(message.into())
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }
}
