use quiz_core::model::{AudioTrack, Question, QuestionLimit, QuizReport};
use thiserror::Error;

/// Progress counter shown next to the question, e.g. `3 / 10` or `3 / ∞`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub answered: u32,
    pub limit: QuestionLimit,
}

/// Visibility and enablement of the quiz controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub reveal_visible: bool,
    pub next_visible: bool,
    /// Reveal and pause accept input.
    pub enabled: bool,
}

impl Controls {
    pub const QUESTION: Self = Self {
        reveal_visible: true,
        next_visible: false,
        enabled: true,
    };

    pub const ANSWER: Self = Self {
        reveal_visible: false,
        next_visible: true,
        enabled: true,
    };

    pub const DISABLED: Self = Self {
        reveal_visible: false,
        next_visible: false,
        enabled: false,
    };
}

/// Everything the session writes to the screen.
pub trait PresentationSurface {
    /// Configuration screen (question limit, autoplay, start).
    fn show_setup(&mut self);

    /// Swap the setup screen for the quiz screen.
    fn show_quiz(&mut self);

    /// Render a fresh question. The answer box and source link are hidden.
    fn show_question(&mut self, question: &Question, progress: Progress);

    /// Render the answer, plus the source link when the question has one.
    fn show_answer(&mut self, question: &Question);

    fn set_controls(&mut self, controls: Controls);

    fn set_timer(&mut self, remaining_secs: u32, proportion: f32);

    fn set_paused(&mut self, paused: bool);

    fn show_completion(&mut self, report: &QuizReport);
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AudioError {
    #[error("audio file {path} is missing")]
    Missing { path: String },
    #[error("audio playback failed: {0}")]
    Playback(String),
}

/// Plays question and answer cues. Failures are reported but never fatal.
pub trait AudioPlayer {
    /// Start `track` from the beginning, replacing whatever was playing.
    ///
    /// # Errors
    ///
    /// Returns `AudioError` when the track cannot be played.
    fn play(&mut self, track: AudioTrack) -> Result<(), AudioError>;

    /// Pause and rewind the current track.
    fn stop(&mut self);
}

/// Audio player that never makes a sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioPlayer for SilentAudio {
    fn play(&mut self, _track: AudioTrack) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop(&mut self) {}
}
