use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;

use thiserror::Error;

use crate::model::{Question, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("the question set is empty")]
    Empty,

    #[error("duplicate question id {0}")]
    DuplicateId(QuestionId),
}

/// The loaded dataset: non-empty, ids unique, shared read-only between owners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Arc<[Question]>,
}

impl QuestionBank {
    /// # Errors
    ///
    /// Returns `BankError::Empty` for an empty list and `BankError::DuplicateId` when two
    /// questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(BankError::DuplicateId(question.id().clone()));
            }
        }
        Ok(Self {
            questions: questions.into(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

impl Deref for QuestionBank {
    type Target = [Question];

    fn deref(&self) -> &Self::Target {
        &self.questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u64) -> Question {
        Question::new(QuestionId::from(id), format!("Q{id}"), format!("A{id}"), None).unwrap()
    }

    #[test]
    fn rejects_empty_set() {
        assert_eq!(QuestionBank::new(Vec::new()).unwrap_err(), BankError::Empty);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = QuestionBank::new(vec![question(1), question(2), question(1)]).unwrap_err();
        assert_eq!(err, BankError::DuplicateId(QuestionId::from(1)));
    }

    #[test]
    fn keeps_dataset_order() {
        let bank = QuestionBank::new(vec![question(3), question(1)]).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank[0].id(), &QuestionId::from(3));
        assert_eq!(bank.get(1).map(Question::id), Some(&QuestionId::from(1)));
        assert!(bank.get(2).is_none());
    }
}
