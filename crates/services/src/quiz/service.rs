use std::time::Duration;

use chrono::{DateTime, Utc};
use quiz_core::model::{
    AudioTrack, Question, QuestionBank, QuestionId, QuestionLimit, QuizReport, QuizSettings,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::countdown::Countdown;
use super::pool::QuestionPool;
use super::scheduler::{TaskHandle, TaskKind, TaskScheduler, TimerEvent};
use super::surface::{AudioPlayer, Controls, PresentationSurface, Progress};
use crate::Clock;
use crate::error::QuizError;

/// Countdown resolution.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Setup screen; nothing running.
    Idle,
    /// A question is on screen and the countdown runs.
    Question,
    /// The answer is on screen.
    Answer,
    /// The limit was reached or the session was ended.
    Finished,
}

/// What an advance led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Asked(QuestionId),
    Finished(QuizReport),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// The quiz state machine.
///
/// Owns question selection, the countdown, pause state, audio coordination and the
/// reveal/advance transitions. Rendering, sound and timers go through the surface, audio
/// player and scheduler it holds; timer firings come back in through `handle_timer`.
///
/// At most one tick task and one auto-advance task are live at any time: every transition
/// cancels the previous ones before scheduling new ones.
pub struct QuizSession<S, A, T> {
    bank: QuestionBank,
    pool: QuestionPool,
    settings: QuizSettings,
    limit: QuestionLimit,
    answered: u32,
    current: Option<usize>,
    phase: QuizPhase,
    paused: bool,
    countdown: Countdown,
    track: Option<AudioTrack>,
    tick: Option<TaskHandle>,
    auto_advance: Option<TaskHandle>,
    auto_advance_suspended: bool,
    started_at: Option<DateTime<Utc>>,
    report: Option<QuizReport>,
    clock: Clock,
    rng: StdRng,
    surface: S,
    audio: A,
    scheduler: T,
}

impl<S, A, T> QuizSession<S, A, T>
where
    S: PresentationSurface,
    A: AudioPlayer,
    T: TaskScheduler,
{
    #[must_use]
    pub fn new(
        bank: QuestionBank,
        settings: QuizSettings,
        surface: S,
        audio: A,
        scheduler: T,
    ) -> Self {
        Self {
            pool: QuestionPool::new(bank.len()),
            bank,
            countdown: Countdown::new(settings.time_per_round_secs()),
            settings,
            limit: QuestionLimit::Unbounded,
            answered: 0,
            current: None,
            phase: QuizPhase::Idle,
            paused: false,
            track: None,
            tick: None,
            auto_advance: None,
            auto_advance_suspended: false,
            started_at: None,
            report: None,
            clock: Clock::default(),
            rng: StdRng::from_os_rng(),
            surface,
            audio,
            scheduler,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Make question order reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    // ─── Accessors ──────────────────────────────────────────────────────────

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
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
    pub fn progress(&self) -> Progress {
        Progress {
            answered: self.answered,
            limit: self.limit,
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_answer_shown(&self) -> bool {
        self.phase == QuizPhase::Answer
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining()
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn pool(&self) -> &QuestionPool {
        &self.pool
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.and_then(|index| self.bank.get(index))
    }

    /// Track that is playing, or would resume after a pause.
    #[must_use]
    pub fn current_track(&self) -> Option<&AudioTrack> {
        self.track.as_ref()
    }

    #[must_use]
    pub fn report(&self) -> Option<&QuizReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn tick_handle(&self) -> Option<TaskHandle> {
        self.tick
    }

    #[must_use]
    pub fn auto_advance_handle(&self) -> Option<TaskHandle> {
        self.auto_advance
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn audio(&self) -> &A {
        &self.audio
    }

    #[must_use]
    pub fn scheduler(&self) -> &T {
        &self.scheduler
    }

    // ─── Transitions ────────────────────────────────────────────────────────

    /// Begin a new session and ask the first question.
    ///
    /// Anything left over from a previous session (timers, audio, pause) is discarded.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyBank` if no question can be drawn.
    pub fn start(&mut self, limit: QuestionLimit) -> Result<AdvanceOutcome, QuizError> {
        self.cancel_timers();
        self.stop_audio();
        self.pool.reset();
        self.answered = 0;
        self.limit = limit;
        self.paused = false;
        self.report = None;
        self.started_at = Some(self.clock.now());

        self.surface.set_paused(false);
        self.surface.show_quiz();
        tracing::info!(%limit, questions = self.bank.len(), "quiz started");

        self.advance_with(true)
    }

    /// Move on to the next question, or finish once the limit is reached.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotStarted` before `start` and `QuizError::Finished` after the
    /// session has ended.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, QuizError> {
        match self.phase {
            QuizPhase::Idle => Err(QuizError::NotStarted),
            QuizPhase::Finished => Err(QuizError::Finished),
            QuizPhase::Question | QuizPhase::Answer => self.advance_with(false),
        }
    }

    fn advance_with(&mut self, initial: bool) -> Result<AdvanceOutcome, QuizError> {
        if self.limit.is_reached(self.answered) {
            return self.end().map(AdvanceOutcome::Finished);
        }
        if !initial {
            self.stop_audio();
        }
        self.cancel_timers();

        let index = self.pool.draw(&mut self.rng).ok_or(QuizError::EmptyBank)?;
        self.current = Some(index);
        self.phase = QuizPhase::Question;
        self.answered = self.answered.saturating_add(1);

        let progress = self.progress();
        let Some(question) = self.bank.get(index) else {
            return Err(QuizError::EmptyBank);
        };
        let id = question.id().clone();
        self.surface.show_question(question, progress);
        self.surface.set_controls(Controls::QUESTION);
        tracing::debug!(
            question = %id,
            answered = self.answered,
            cycle = self.pool.cycle(),
            "question asked"
        );

        self.start_countdown();
        self.play(AudioTrack::question(id.clone()));
        Ok(AdvanceOutcome::Asked(id))
    }

    /// Show the answer for the current question.
    ///
    /// Returns false (and does nothing) unless a question is on screen with its answer still
    /// hidden. A timer-triggered reveal schedules the auto-advance when autoplay is on.
    pub fn reveal(&mut self, auto_triggered: bool) -> bool {
        if self.phase != QuizPhase::Question {
            return false;
        }
        let Some(index) = self.current else {
            return false;
        };

        self.phase = QuizPhase::Answer;
        self.cancel_tick();
        self.stop_audio();

        let Some(question) = self.bank.get(index) else {
            return false;
        };
        let id = question.id().clone();
        self.surface.show_answer(question);
        self.surface.set_controls(Controls::ANSWER);
        tracing::debug!(question = %id, auto_triggered, "answer revealed");

        self.play(AudioTrack::answer(id));
        if auto_triggered && self.settings.autoplay() {
            self.schedule_auto_advance();
        }
        true
    }

    /// Pause or resume. Returns the new paused state.
    ///
    /// Pausing stops audio, freezes the countdown and holds back a pending auto-advance.
    /// Resuming replays the current track, continues the countdown from where it stopped and
    /// re-arms a held auto-advance with the full delay.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotStarted` / `QuizError::Finished` outside a running session.
    pub fn toggle_pause(&mut self) -> Result<bool, QuizError> {
        match self.phase {
            QuizPhase::Idle => return Err(QuizError::NotStarted),
            QuizPhase::Finished => return Err(QuizError::Finished),
            QuizPhase::Question | QuizPhase::Answer => {}
        }

        self.paused = !self.paused;
        self.surface.set_paused(self.paused);

        if self.paused {
            if self.track.is_some() {
                self.audio.stop();
            }
            self.cancel_tick();
            if let Some(handle) = self.auto_advance.take() {
                self.scheduler.cancel(handle);
                self.auto_advance_suspended = true;
            }
        } else {
            if let Some(track) = self.track.clone() {
                self.play(track);
            }
            if self.phase == QuizPhase::Question {
                self.schedule_tick();
            }
            if std::mem::take(&mut self.auto_advance_suspended) {
                self.schedule_auto_advance();
            }
        }

        tracing::debug!(
            paused = self.paused,
            remaining = self.countdown.remaining(),
            "pause toggled"
        );
        Ok(self.paused)
    }

    /// Change the autoplay preference. Turning it off drops a pending auto-advance.
    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.settings.set_autoplay(autoplay);
        if !autoplay {
            self.cancel_auto_advance();
        }
    }

    /// Dispatch a fired timer. Events from cancelled tasks are ignored.
    ///
    /// # Errors
    ///
    /// Propagates errors from an auto-advance.
    pub fn handle_timer(&mut self, event: TimerEvent) -> Result<Option<AdvanceOutcome>, QuizError> {
        match event.kind {
            TaskKind::Tick if self.tick == Some(event.handle) => {
                self.on_tick();
                Ok(None)
            }
            TaskKind::AutoAdvance if self.auto_advance == Some(event.handle) => {
                self.auto_advance = None;
                self.advance_with(false).map(Some)
            }
            _ => {
                tracing::trace!(?event, "ignoring stale timer event");
                Ok(None)
            }
        }
    }

    fn on_tick(&mut self) {
        if self.paused || self.phase != QuizPhase::Question {
            return;
        }
        let expired = self.countdown.tick();
        self.render_timer();
        if expired {
            self.reveal(true);
        }
    }

    /// Stop everything and report how many questions were asked.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotStarted` on the setup screen and `QuizError::Report` if the
    /// clock went backwards.
    pub fn end(&mut self) -> Result<QuizReport, QuizError> {
        if self.phase == QuizPhase::Idle {
            return Err(QuizError::NotStarted);
        }
        self.cancel_timers();
        self.stop_audio();
        self.phase = QuizPhase::Finished;
        self.current = None;

        let completed_at = self.clock.now();
        let started_at = self.started_at.unwrap_or(completed_at);
        let report = QuizReport::new(self.answered, self.limit, started_at, completed_at)?;

        self.surface.set_controls(Controls::DISABLED);
        self.surface.show_completion(&report);
        self.report = Some(report);
        tracing::info!(
            answered = self.answered,
            elapsed_secs = report.elapsed().num_seconds(),
            "quiz finished"
        );
        Ok(report)
    }

    /// Back to the setup screen with nothing running.
    pub fn reset(&mut self) {
        self.cancel_timers();
        self.stop_audio();
        self.phase = QuizPhase::Idle;
        self.current = None;
        self.paused = false;
        self.countdown.restart();
        self.surface.set_paused(false);
        self.surface.set_controls(Controls::DISABLED);
        self.surface.show_setup();
    }

    // ─── Timers and audio ───────────────────────────────────────────────────

    fn start_countdown(&mut self) {
        self.countdown.restart();
        self.render_timer();
        if !self.paused {
            self.schedule_tick();
        }
    }

    fn render_timer(&mut self) {
        self.surface
            .set_timer(self.countdown.remaining(), self.countdown.proportion());
    }

    fn schedule_tick(&mut self) {
        self.cancel_tick();
        self.tick = Some(
            self.scheduler
                .schedule_repeating(TaskKind::Tick, TICK_PERIOD),
        );
    }

    fn schedule_auto_advance(&mut self) {
        self.cancel_auto_advance();
        let delay = self.settings.auto_advance_delay();
        self.auto_advance = Some(self.scheduler.schedule_once(TaskKind::AutoAdvance, delay));
        tracing::debug!(?delay, "auto-advance scheduled");
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.tick.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn cancel_auto_advance(&mut self) {
        self.auto_advance_suspended = false;
        if let Some(handle) = self.auto_advance.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn cancel_timers(&mut self) {
        self.cancel_tick();
        self.cancel_auto_advance();
    }

    /// Remember `track` and play it unless paused. Playback errors are swallowed.
    fn play(&mut self, track: AudioTrack) {
        self.track = Some(track.clone());
        if self.paused {
            return;
        }
        if let Err(err) = self.audio.play(track.clone()) {
            tracing::debug!(%err, track = %track.relative_path(), "continuing without sound");
        }
    }

    fn stop_audio(&mut self) {
        if self.track.take().is_some() {
            self.audio.stop();
        }
    }
}
