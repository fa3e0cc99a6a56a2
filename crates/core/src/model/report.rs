use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::QuestionLimit;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,
}

/// What a finished session reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizReport {
    answered: u32,
    limit: QuestionLimit,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl QuizReport {
    /// # Errors
    ///
    /// Returns `ReportError::InvalidTimeRange` if `completed_at` is before `started_at`.
    pub fn new(
        answered: u32,
        limit: QuestionLimit,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, ReportError> {
        if completed_at < started_at {
            return Err(ReportError::InvalidTimeRange);
        }
        Ok(Self {
            answered,
            limit,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    #[must_use]
    pub fn limit(&self) -> QuestionLimit {
        self.limit
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn elapsed(&self) -> chrono::Duration {
        self.completed_at - self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn rejects_inverted_range() {
        let now = fixed_now();
        let err = QuizReport::new(1, QuestionLimit::Unbounded, now, now - chrono::Duration::seconds(1))
            .unwrap_err();
        assert_eq!(err, ReportError::InvalidTimeRange);
    }

    #[test]
    fn elapsed_spans_the_session() {
        let now = fixed_now();
        let report = QuizReport::new(
            3,
            QuestionLimit::from_count(Some(3)),
            now,
            now + chrono::Duration::seconds(95),
        )
        .unwrap();
        assert_eq!(report.answered(), 3);
        assert_eq!(report.elapsed().num_seconds(), 95);
    }
}
