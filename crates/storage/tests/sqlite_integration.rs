use quiz_core::model::{Question, QuestionId};
use storage::repository::{QuestionRepository, Storage};
use storage::sqlite::SqliteRepository;

fn question(id: &str, prompt: &str, source: Option<&str>) -> Question {
    Question::new(QuestionId::new(id), prompt, format!("answer {id}"), source).unwrap()
}

#[tokio::test]
async fn sqlite_lists_questions_in_insertion_order() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_order?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.upsert_question(&question("30", "third id, first in", None))
        .await
        .unwrap();
    repo.upsert_question(&question("q10", "first id, second in", Some("https://example.org/a")))
        .await
        .unwrap();
    repo.upsert_question(&question("20", "second id, third in", None))
        .await
        .unwrap();

    let listed = repo.list_questions().await.expect("list");
    let ids: Vec<&str> = listed.iter().map(|q| q.id().as_str()).collect();
    assert_eq!(ids, ["30", "q10", "20"]);
    assert_eq!(
        listed[1].source().map(|url| url.as_str()),
        Some("https://example.org/a")
    );
}

#[tokio::test]
async fn sqlite_upsert_keeps_position_and_updates_text() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_upsert?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    // Running migrations twice is a no-op.
    repo.migrate().await.expect("migrate again");

    repo.upsert_question(&question("1", "one", None)).await.unwrap();
    repo.upsert_question(&question("2", "two", None)).await.unwrap();
    repo.upsert_question(&question("1", "one, revised", None))
        .await
        .unwrap();

    let listed = repo.list_questions().await.unwrap();
    let prompts: Vec<&str> = listed.iter().map(Question::prompt).collect();
    assert_eq!(prompts, ["one, revised", "two"]);

    repo.clear_questions().await.unwrap();
    assert!(repo.list_questions().await.unwrap().is_empty());
}

#[tokio::test]
async fn storage_sqlite_exposes_question_repository() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    assert!(storage.questions.list_questions().await.unwrap().is_empty());
}
