//! JSON document backend: `{"questions": [{"id", "question", "answer", "httpsource"}]}`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiz_core::model::Question;
use serde::{Deserialize, Serialize};

use crate::repository::{QuestionRecord, QuestionRepository, StorageError, records_into_questions};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionDocument {
    pub questions: Vec<QuestionRecord>,
}

impl QuestionDocument {
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the bytes are not a question document.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, StorageError> {
        serde_json::from_slice(bytes).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns `StorageError::InvalidQuestion` for the first entry that fails validation.
    pub fn into_questions(self) -> Result<Vec<Question>, StorageError> {
        records_into_questions(self.questions)
    }
}

/// Reads the question document from disk on every `list_questions` call.
#[derive(Debug, Clone)]
pub struct JsonQuestionFile {
    path: PathBuf,
}

impl JsonQuestionFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the file is missing, `StorageError::Connection` for
    /// other I/O failures and `StorageError::Serialization` for malformed JSON.
    pub async fn read_document(&self) -> Result<QuestionDocument, StorageError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(self.path.display().to_string())
            } else {
                StorageError::Connection(format!("{}: {e}", self.path.display()))
            }
        })?;
        QuestionDocument::from_slice(&bytes)
    }
}

#[async_trait]
impl QuestionRepository for JsonQuestionFile {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let questions = self.read_document().await?.into_questions()?;
        tracing::info!(
            path = %self.path.display(),
            count = questions.len(),
            "loaded questions from json"
        );
        Ok(questions)
    }
}
