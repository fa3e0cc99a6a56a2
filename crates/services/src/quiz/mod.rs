mod countdown;
mod pool;
mod scheduler;
mod service;
mod surface;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use countdown::Countdown;
pub use pool::QuestionPool;
pub use scheduler::{TaskHandle, TaskKind, TaskScheduler, TimerEvent, TokioScheduler};
pub use service::{AdvanceOutcome, QuizPhase, QuizSession, TICK_PERIOD};
pub use surface::{AudioError, AudioPlayer, Controls, PresentationSurface, Progress, SilentAudio};
pub use workflow::{QuizCommand, QuizLoop};
