use dioxus::prelude::*;
use quiz_core::model::BankError;
use services::QuestionBankError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// The question store could not be read or held an invalid record.
    LoadFailed,
    /// The store was readable but held no questions.
    EmptyBank,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::LoadFailed => "Failed to load questions.",
            Self::EmptyBank => "No questions available.",
        }
    }
}

impl From<&QuestionBankError> for ViewError {
    fn from(err: &QuestionBankError) -> Self {
        match err {
            QuestionBankError::Bank(BankError::Empty) => Self::EmptyBank,
            _ => Self::LoadFailed,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::LoadFailed),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
