use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a question; also keys its audio tracks.
///
/// Datasets use either numbers or strings; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawQuestionId", into = "String")]
pub struct QuestionId(String);

impl QuestionId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into().trim().to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for QuestionId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<QuestionId> for String {
    fn from(id: QuestionId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuestionId {
    Number(u64),
    Text(String),
}

impl From<RawQuestionId> for QuestionId {
    fn from(raw: RawQuestionId) -> Self {
        match raw {
            RawQuestionId::Number(value) => Self::from(value),
            RawQuestionId::Text(value) => Self::new(value),
        }
    }
}
