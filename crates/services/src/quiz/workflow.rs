use quiz_core::model::{QuestionBank, QuestionLimit, QuizReport, QuizSettings};
use tokio::sync::mpsc::UnboundedReceiver;

use super::scheduler::{TimerEvent, TokioScheduler};
use super::service::{AdvanceOutcome, QuizSession};
use super::surface::{AudioPlayer, PresentationSurface};
use crate::Clock;

/// User actions accepted by the quiz driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCommand {
    Start(QuestionLimit),
    Reveal,
    Next,
    TogglePause,
    SetAutoplay(bool),
    /// Finish early and show the completion screen.
    End,
    /// Back to setup ("play again").
    Reset,
}

/// Drives a `QuizSession` from user commands and its own timer events.
///
/// Everything runs on the task that awaits `run`, one input at a time.
pub struct QuizLoop<S, A> {
    session: QuizSession<S, A, TokioScheduler>,
    timers: UnboundedReceiver<TimerEvent>,
}

impl<S, A> QuizLoop<S, A>
where
    S: PresentationSurface,
    A: AudioPlayer,
{
    /// Must be called inside a tokio runtime; timers are spawned as tasks.
    #[must_use]
    pub fn new(bank: QuestionBank, settings: QuizSettings, surface: S, audio: A) -> Self {
        let (scheduler, timers) = TokioScheduler::new();
        Self {
            session: QuizSession::new(bank, settings, surface, audio, scheduler),
            timers,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.session = self.session.with_clock(clock);
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.session = self.session.with_seed(seed);
        self
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession<S, A, TokioScheduler> {
        &self.session
    }

    /// Apply one command. Contract violations are logged and otherwise ignored.
    ///
    /// Returns the report when the command finished the session.
    pub fn apply(&mut self, command: QuizCommand) -> Option<QuizReport> {
        tracing::debug!(?command, "quiz command");
        let result = match command {
            QuizCommand::Start(limit) => self.session.start(limit).map(finished),
            QuizCommand::Next => self.session.advance().map(finished),
            QuizCommand::Reveal => {
                self.session.reveal(false);
                Ok(None)
            }
            QuizCommand::TogglePause => self.session.toggle_pause().map(|_| None),
            QuizCommand::SetAutoplay(autoplay) => {
                self.session.set_autoplay(autoplay);
                Ok(None)
            }
            QuizCommand::End => self.session.end().map(Some),
            QuizCommand::Reset => {
                self.session.reset();
                Ok(None)
            }
        };

        result.unwrap_or_else(|err| {
            tracing::warn!(%err, ?command, "quiz command rejected");
            None
        })
    }

    /// Feed one timer event to the session.
    pub fn on_timer(&mut self, event: TimerEvent) -> Option<QuizReport> {
        self.session
            .handle_timer(event)
            .map(|outcome| outcome.and_then(finished))
            .unwrap_or_else(|err| {
                tracing::warn!(%err, ?event, "timer event failed");
                None
            })
    }

    /// Process commands and timer events until the command channel closes.
    ///
    /// Returns the most recent completion report.
    pub async fn run(mut self, mut commands: UnboundedReceiver<QuizCommand>) -> Option<QuizReport> {
        let mut last_report = None;
        loop {
            tokio::select! {
                biased;
                command = commands.recv() => {
                    let Some(command) = command else { break };
                    if let Some(report) = self.apply(command) {
                        last_report = Some(report);
                    }
                }
                Some(event) = self.timers.recv() => {
                    if let Some(report) = self.on_timer(event) {
                        last_report = Some(report);
                    }
                }
            }
        }
        tracing::debug!(answered = self.session.answered(), "quiz loop stopped");
        last_report
    }
}

fn finished(outcome: AdvanceOutcome) -> Option<QuizReport> {
    match outcome {
        AdvanceOutcome::Finished(report) => Some(report),
        AdvanceOutcome::Asked(_) => None,
    }
}
