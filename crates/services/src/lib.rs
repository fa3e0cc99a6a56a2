#![forbid(unsafe_code)]

pub mod error;
pub mod question_bank;
pub mod quiz;

pub use quiz_core::Clock;

pub use error::{QuestionBankError, QuizError};
pub use question_bank::QuestionBankService;
pub use quiz::{
    AdvanceOutcome, AudioError, AudioPlayer, Controls, Countdown, PresentationSurface, Progress,
    QuestionPool, QuizCommand, QuizLoop, QuizPhase, QuizSession, SilentAudio, TaskHandle,
    TaskKind, TaskScheduler, TimerEvent, TokioScheduler,
};
