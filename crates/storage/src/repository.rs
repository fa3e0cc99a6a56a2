use async_trait::async_trait;
use quiz_core::model::{Question, QuestionError, QuestionId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::json::JsonQuestionFile;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("question source not found: {0}")]
    NotFound(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid question at position {position}: {source}")]
    InvalidQuestion {
        position: usize,
        #[source]
        source: QuestionError,
    },
}

/// Stored shape of a question.
///
/// Field names follow the published dataset format (`httpsource` for the link). The id may
/// be a JSON number or string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub httpsource: Option<String>,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: question.id().clone(),
            question: question.prompt().to_owned(),
            answer: question.answer().to_owned(),
            httpsource: question.source().map(|url| url.as_str().to_owned()),
        }
    }

    /// Convert the record into a validated domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the question or answer text is blank.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        Question::new(
            self.id,
            self.question,
            self.answer,
            self.httpsource.as_deref(),
        )
    }
}

/// Validate a batch of records, reporting the first bad entry by position.
///
/// # Errors
///
/// Returns `StorageError::InvalidQuestion` for the first record that fails validation.
pub fn records_into_questions(records: Vec<QuestionRecord>) -> Result<Vec<Question>, StorageError> {
    records
        .into_iter()
        .enumerate()
        .map(|(position, record)| {
            record
                .into_question()
                .map_err(|source| StorageError::InvalidQuestion { position, source })
        })
        .collect()
}

/// Read side of the question store.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Return every stored question in dataset order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read or holds invalid entries.
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError>;
}

/// In-memory question store for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<Vec<Question>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions: Arc::new(Mutex::new(questions)),
        }
    }

    /// Insert or replace a question, keeping first-insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn upsert_question(&self, question: Question) -> Result<(), StorageError> {
        let mut guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        match guard.iter_mut().find(|existing| existing.id() == question.id()) {
            Some(existing) => *existing = question,
            None => guard.push(question),
        }
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

/// Holds the configured question source behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
}

impl Storage {
    #[must_use]
    pub fn json(path: impl Into<PathBuf>) -> Self {
        Self {
            questions: Arc::new(JsonQuestionFile::new(path)),
        }
    }
}
