use std::sync::Arc;

use quiz_core::model::QuestionBank;
use storage::repository::QuestionRepository;

use crate::error::QuestionBankError;

/// Loads the dataset once and validates it into a `QuestionBank`.
#[derive(Clone)]
pub struct QuestionBankService {
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionBankService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// Read every question from the store.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Storage` if the store cannot be read and
    /// `QuestionBankError::Bank` if the set is empty or has duplicate ids.
    pub async fn load(&self) -> Result<QuestionBank, QuestionBankError> {
        let questions = self.questions.list_questions().await.inspect_err(|err| {
            tracing::warn!(%err, "failed to load questions");
        })?;
        let bank = QuestionBank::new(questions)?;
        tracing::info!(count = bank.len(), "question bank ready");
        Ok(bank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{BankError, Question, QuestionId};
    use storage::repository::{InMemoryRepository, QuestionRepository, StorageError};

    fn question(id: u64) -> Question {
        Question::new(QuestionId::from(id), format!("Q{id}"), format!("A{id}"), None).unwrap()
    }

    #[tokio::test]
    async fn loads_non_empty_bank() {
        let repo = InMemoryRepository::with_questions(vec![question(1), question(2)]);
        let bank = QuestionBankService::new(Arc::new(repo)).load().await.unwrap();
        assert_eq!(bank.len(), 2);
    }

    #[tokio::test]
    async fn empty_store_is_rejected() {
        let service = QuestionBankService::new(Arc::new(InMemoryRepository::new()));
        let err = service.load().await.unwrap_err();
        assert!(matches!(err, QuestionBankError::Bank(BankError::Empty)));
    }

    #[tokio::test]
    async fn storage_failure_is_propagated() {
        let service = QuestionBankService::new(Arc::new(storage::json::JsonQuestionFile::new(
            "missing/questions.json",
        )));
        let err = service.load().await.unwrap_err();
        assert!(matches!(
            err,
            QuestionBankError::Storage(StorageError::NotFound(_))
        ));
    }

    struct DuplicateIds;

    #[async_trait::async_trait]
    impl QuestionRepository for DuplicateIds {
        async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
            Ok(vec![question(3), question(4), question(3)])
        }
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let err = QuestionBankService::new(Arc::new(DuplicateIds))
            .load()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            QuestionBankError::Bank(BankError::DuplicateId(id)) if id == QuestionId::from(3)
        ));
    }
}
