use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use quiz_core::model::{Question, QuestionLimit};
use services::QuizCommand;
use storage::repository::{QuestionRepository, StorageError};

use super::test_harness::{questions, setup_view_harness, setup_view_harness_with_repo};

#[tokio::test(flavor = "current_thread")]
async fn setup_screen_renders_after_load() {
    let mut harness = setup_view_harness(questions(3));
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Start Quiz"), "missing start button in {html}");
    assert!(html.contains("question-limit"), "missing limit input in {html}");
    assert!(html.contains("Autoplay"), "missing autoplay toggle in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn empty_store_shows_error_with_reload() {
    let mut harness = setup_view_harness(Vec::new());
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("No questions available."), "missing error in {html}");
    assert!(html.contains("Reload"), "missing reload button in {html}");
    assert!(!harness.handles.is_registered());
}

struct FailingRepo;

#[async_trait::async_trait]
impl QuestionRepository for FailingRepo {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn unreadable_store_shows_load_error() {
    let mut harness = setup_view_harness_with_repo(Arc::new(FailingRepo));
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Failed to load questions."), "missing error in {html}");
}

/// Fails the first read, then serves its questions.
struct FlakyRepo {
    reads: AtomicUsize,
    questions: Vec<Question>,
}

#[async_trait::async_trait]
impl QuestionRepository for FlakyRepo {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        if self.reads.fetch_add(1, Ordering::SeqCst) == 0 {
            return Err(StorageError::Connection("offline".to_string()));
        }
        Ok(self.questions.clone())
    }
}

#[tokio::test(flavor = "current_thread")]
async fn reload_after_failed_load_reaches_setup() {
    let repo = Arc::new(FlakyRepo {
        reads: AtomicUsize::new(0),
        questions: questions(2),
    });
    let mut harness = setup_view_harness_with_repo(repo.clone());
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Failed to load questions."), "missing error in {html}");
    assert!(html.contains("reload-btn"), "missing reload button in {html}");
    assert!(!harness.handles.is_registered());

    harness.reload();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Start Quiz"), "setup not shown after reload in {html}");
    assert!(!html.contains("Failed to load questions."), "stale error in {html}");
    assert_eq!(repo.reads.load(Ordering::SeqCst), 2);
    assert!(harness.handles.is_registered());
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_flow_from_start_to_play_again() {
    let mut harness = setup_view_harness(questions(3));
    harness.rebuild();
    harness.settle().await;
    assert!(harness.handles.is_registered());

    harness
        .handles
        .send(QuizCommand::Start(QuestionLimit::from_count(Some(1))));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Reveal Answer"), "missing reveal in {html}");
    assert!(html.contains("/ 1"), "missing progress in {html}");
    assert!(html.contains("Question "), "missing question text in {html}");
    assert!(!html.contains("answer-text"), "answer shown too early in {html}");

    harness.handles.send(QuizCommand::Reveal);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("answer-text"), "missing answer in {html}");
    assert!(html.contains("https://example.org/source"), "missing source in {html}");
    assert!(html.contains("Next Question"), "missing next in {html}");

    harness.handles.send(QuizCommand::TogglePause);
    harness.settle().await;
    assert!(harness.render().contains("Resume"));

    harness.handles.send(QuizCommand::Next);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Quiz Complete!"), "missing completion in {html}");
    assert!(html.contains("Answered 1 questions."), "missing count in {html}");

    harness.handles.send(QuizCommand::Reset);
    harness.settle().await;
    assert!(harness.render().contains("Start Quiz"));
}
