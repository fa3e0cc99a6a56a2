use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{Question, QuestionId, QuizSettings};
use services::QuestionBankService;
use storage::repository::{InMemoryRepository, QuestionRepository};

use super::QuizView;
use super::quiz::QuizTestHandles;
use crate::context::{AudioSource, UiApp, build_app_context};

struct TestApp {
    question_bank: Arc<QuestionBankService>,
}

impl UiApp for TestApp {
    fn question_bank(&self) -> Arc<QuestionBankService> {
        Arc::clone(&self.question_bank)
    }

    fn settings(&self) -> QuizSettings {
        QuizSettings::default()
    }

    fn audio(&self) -> AudioSource {
        AudioSource::Muted
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn QuizRouterHarness(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    rsx! { QuizView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn reload(&mut self) {
        let handles = self.handles.clone();
        self.dom.in_runtime(|| handles.reload());
    }

    /// Let pending resources and the quiz loop catch up.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn questions(count: u64) -> Vec<Question> {
    (1..=count)
        .map(|id| {
            Question::new(
                QuestionId::from(id),
                format!("Question {id}?"),
                format!("Answer {id}"),
                Some("https://example.org/source"),
            )
            .expect("valid question")
        })
        .collect()
}

pub fn setup_view_harness(questions: Vec<Question>) -> ViewHarness {
    setup_view_harness_with_repo(Arc::new(InMemoryRepository::with_questions(questions)))
}

pub fn setup_view_harness_with_repo(repo: Arc<dyn QuestionRepository>) -> ViewHarness {
    let handles = QuizTestHandles::default();
    let app = Arc::new(TestApp {
        question_bank: Arc::new(QuestionBankService::new(repo)),
    });
    let dom = VirtualDom::new_with_props(
        QuizRouterHarness,
        HarnessProps {
            app,
            handles: handles.clone(),
        },
    );
    ViewHarness { dom, handles }
}
