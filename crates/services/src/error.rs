//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{BankError, ReportError};
use storage::repository::StorageError;

/// Errors emitted while loading the question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Bank(#[from] BankError),
}

/// Errors emitted by the quiz session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has not been started")]
    NotStarted,
    #[error("quiz already finished")]
    Finished,
    #[error("no questions available")]
    EmptyBank,
    #[error(transparent)]
    Report(#[from] ReportError),
}
