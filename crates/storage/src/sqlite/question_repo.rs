use quiz_core::model::{Question, QuestionId};
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{QuestionRecord, QuestionRepository, StorageError, records_into_questions};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn map_question_row(row: &sqlx::sqlite::SqliteRow) -> Result<QuestionRecord, StorageError> {
    let id: String = row.try_get("id").map_err(ser)?;
    Ok(QuestionRecord {
        id: QuestionId::new(id),
        question: row.try_get("question").map_err(ser)?,
        answer: row.try_get("answer").map_err(ser)?,
        httpsource: row.try_get("source").map_err(ser)?,
    })
}

impl SqliteRepository {
    /// Insert or update a question. New questions are appended after the existing ones;
    /// updates keep their original position.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the write fails.
    pub async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        let record = QuestionRecord::from_question(question);

        sqlx::query(
            r"
            INSERT INTO questions (id, position, question, answer, source)
            VALUES (?1, (SELECT COALESCE(MAX(position), -1) + 1 FROM questions), ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                source = excluded.source
            ",
        )
        .bind(String::from(record.id))
        .bind(record.question)
        .bind(record.answer)
        .bind(record.httpsource)
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    /// Remove every question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the delete fails.
    pub async fn clear_questions(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM questions")
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT CAST(id AS TEXT) AS id, question, answer, source
            FROM questions
            ORDER BY position ASC, id ASC
            ",
        )
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let records = rows
            .iter()
            .map(map_question_row)
            .collect::<Result<Vec<_>, _>>()?;
        let questions = records_into_questions(records)?;
        tracing::info!(count = questions.len(), "loaded questions from sqlite");
        Ok(questions)
    }
}
