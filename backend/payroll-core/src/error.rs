// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

// --- Error Types ---

#[derive(Error, Debug)]
pub enum PayrollError {
    #[error("Error: {} not found.", path.display())]
    MissingInput { path: PathBuf },
    #[error("Error reading {}: {reason}", path.display())]
    UnreadableInput { path: PathBuf, reason: String },
    #[error("Column '{field}' missing in {table}")]
    SchemaViolation { field: String, table: String },
    #[error("Error merging data: {table}: {reason}")]
    MergeFailure { table: String, reason: String },
    #[error("Amount out of range computing {column} for {subject}")]
    AmountOverflow { subject: String, column: String },
    #[error("Error saving payroll file {}: {reason}", path.display())]
    OutputWriteFailure { path: PathBuf, reason: String },
    #[error("Invalid payroll rate configuration: {0}")]
    Config(#[from] envy::Error),
}

impl PayrollError {
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        PayrollError::UnreadableInput {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn overflow(subject: impl Into<String>, column: &str) -> Self {
        PayrollError::AmountOverflow {
            subject: subject.into(),
            column: column.to_string(),
        }
    }

    pub fn write_failure(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        PayrollError::OutputWriteFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
