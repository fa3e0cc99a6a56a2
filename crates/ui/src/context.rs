use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::model::QuizSettings;
use services::QuestionBankService;

/// Where question and answer cues come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioSource {
    /// Run without sound.
    Muted,
    /// Directory holding `question/<id>.mp3` and `answer/<id>.mp3`.
    Directory(PathBuf),
}

pub trait UiApp: Send + Sync {
    fn question_bank(&self) -> Arc<QuestionBankService>;
    fn settings(&self) -> QuizSettings;
    fn audio(&self) -> AudioSource;
}

#[derive(Clone)]
pub struct AppContext {
    question_bank: Arc<QuestionBankService>,
    settings: QuizSettings,
    audio: AudioSource,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            question_bank: app.question_bank(),
            settings: app.settings(),
            audio: app.audio(),
        }
    }

    #[must_use]
    pub fn question_bank(&self) -> Arc<QuestionBankService> {
        Arc::clone(&self.question_bank)
    }

    /// Defaults for every session started from this window.
    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    #[must_use]
    pub fn audio(&self) -> &AudioSource {
        &self.audio
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
