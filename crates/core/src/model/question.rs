use thiserror::Error;
use url::Url;

use crate::model::QuestionId;

/// Placeholder some datasets use instead of leaving the source empty.
const SOURCE_PLACEHOLDER: &str = "#";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id}: question text must not be empty")]
    EmptyPrompt { id: QuestionId },

    #[error("question {id}: answer text must not be empty")]
    EmptyAnswer { id: QuestionId },
}

/// A single quiz entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    answer: String,
    source: Option<Url>,
}

impl Question {
    /// Build a validated question.
    ///
    /// Text is trimmed. A missing, blank or `"#"` source means "no source link"; so does one
    /// that is not an absolute URL, which is logged and dropped.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if either text is blank.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        answer: impl Into<String>,
        source: Option<&str>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into().trim().to_owned();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }
        let answer = answer.into().trim().to_owned();
        if answer.is_empty() {
            return Err(QuestionError::EmptyAnswer { id });
        }
        let source = parse_source(&id, source);

        Ok(Self {
            id,
            prompt,
            answer,
            source,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn source(&self) -> Option<&Url> {
        self.source.as_ref()
    }
}

fn parse_source(id: &QuestionId, raw: Option<&str>) -> Option<Url> {
    let raw = raw.map(str::trim)?;
    if raw.is_empty() || raw == SOURCE_PLACEHOLDER {
        return None;
    }
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(err) => {
            tracing::warn!(question = %id, raw, %err, "ignoring unusable source link");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_text_and_keeps_source() {
        let q = Question::new(
            QuestionId::new("q1"),
            "  Capital of France? ",
            "Paris\n",
            Some("https://en.wikipedia.org/wiki/Paris"),
        )
        .unwrap();
        assert_eq!(q.prompt(), "Capital of France?");
        assert_eq!(q.answer(), "Paris");
        assert_eq!(
            q.source().map(Url::as_str),
            Some("https://en.wikipedia.org/wiki/Paris")
        );
    }

    #[test]
    fn placeholder_and_blank_sources_mean_no_link() {
        for raw in [None, Some(""), Some("  "), Some("#")] {
            let q = Question::new(QuestionId::from(2), "Q", "A", raw).unwrap();
            assert!(q.source().is_none(), "expected no source for {raw:?}");
        }
    }

    #[test]
    fn rejects_blank_text() {
        let id = QuestionId::from(3);
        assert_eq!(
            Question::new(id.clone(), " ", "A", None).unwrap_err(),
            QuestionError::EmptyPrompt { id: id.clone() }
        );
        assert_eq!(
            Question::new(id.clone(), "Q", "", None).unwrap_err(),
            QuestionError::EmptyAnswer { id }
        );
    }

    #[test]
    fn unusable_source_keeps_question_without_link() {
        for raw in ["wiki/Paris", "en.wikipedia.org/wiki/Paris"] {
            let q = Question::new(QuestionId::from(4), "Q", "A", Some(raw)).unwrap();
            assert_eq!(q.prompt(), "Q");
            assert!(q.source().is_none(), "expected no source for {raw:?}");
        }
    }
}
