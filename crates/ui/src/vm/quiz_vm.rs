use dioxus::prelude::*;

use quiz_core::model::{Question, QuestionLimit, QuizReport};
use services::{Controls, PresentationSurface, Progress, QuizCommand};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuizScreen {
    #[default]
    Setup,
    Quiz,
    Complete,
}

/// Everything the quiz page renders, written by the session through `PresentationSurface`.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizScreenVm {
    screen: QuizScreen,
    question: String,
    answer: Option<String>,
    source: Option<String>,
    answered: u32,
    limit: QuestionLimit,
    controls: Controls,
    remaining_secs: u32,
    proportion: f32,
    paused: bool,
    report: Option<QuizReport>,
}

impl Default for QuizScreenVm {
    fn default() -> Self {
        Self {
            screen: QuizScreen::Setup,
            question: String::new(),
            answer: None,
            source: None,
            answered: 0,
            limit: QuestionLimit::Unbounded,
            controls: Controls::DISABLED,
            remaining_secs: 0,
            proportion: 1.0,
            paused: false,
            report: None,
        }
    }
}

impl QuizScreenVm {
    #[must_use]
    pub fn screen(&self) -> QuizScreen {
        self.screen
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// `None` while the answer is hidden.
    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }

    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    /// `/ 10` or `/ ∞`.
    #[must_use]
    pub fn limit_label(&self) -> String {
        format!("/ {}", self.limit)
    }

    #[must_use]
    pub fn controls(&self) -> Controls {
        self.controls
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// CSS width of the timer bar.
    #[must_use]
    pub fn timer_width(&self) -> String {
        format!("{:.0}%", self.proportion.clamp(0.0, 1.0) * 100.0)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn pause_label(&self) -> &'static str {
        if self.paused { "▶ Resume" } else { "⏸ Pause" }
    }

    #[must_use]
    pub fn report(&self) -> Option<&QuizReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn completion_message(&self) -> Option<String> {
        self.report
            .map(|report| format!("Answered {} questions.", report.answered()))
    }
}

impl PresentationSurface for QuizScreenVm {
    fn show_setup(&mut self) {
        *self = Self::default();
    }

    fn show_quiz(&mut self) {
        self.screen = QuizScreen::Quiz;
        self.report = None;
    }

    fn show_question(&mut self, question: &Question, progress: Progress) {
        self.question = question.prompt().to_owned();
        self.answer = None;
        self.source = None;
        self.answered = progress.answered;
        self.limit = progress.limit;
    }

    fn show_answer(&mut self, question: &Question) {
        self.answer = Some(question.answer().to_owned());
        self.source = question.source().map(|url| url.as_str().to_owned());
    }

    fn set_controls(&mut self, controls: Controls) {
        self.controls = controls;
    }

    fn set_timer(&mut self, remaining_secs: u32, proportion: f32) {
        self.remaining_secs = remaining_secs;
        self.proportion = proportion;
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    fn show_completion(&mut self, report: &QuizReport) {
        self.screen = QuizScreen::Complete;
        self.report = Some(*report);
    }
}

/// Forwards surface writes into a signal so the page re-renders.
#[derive(Clone, Copy)]
pub struct SignalSurface {
    vm: Signal<QuizScreenVm>,
}

impl SignalSurface {
    #[must_use]
    pub fn new(vm: Signal<QuizScreenVm>) -> Self {
        Self { vm }
    }
}

impl PresentationSurface for SignalSurface {
    fn show_setup(&mut self) {
        self.vm.write().show_setup();
    }

    fn show_quiz(&mut self) {
        self.vm.write().show_quiz();
    }

    fn show_question(&mut self, question: &Question, progress: Progress) {
        self.vm.write().show_question(question, progress);
    }

    fn show_answer(&mut self, question: &Question) {
        self.vm.write().show_answer(question);
    }

    fn set_controls(&mut self, controls: Controls) {
        self.vm.write().set_controls(controls);
    }

    fn set_timer(&mut self, remaining_secs: u32, proportion: f32) {
        self.vm.write().set_timer(remaining_secs, proportion);
    }

    fn set_paused(&mut self, paused: bool) {
        self.vm.write().set_paused(paused);
    }

    fn show_completion(&mut self, report: &QuizReport) {
        self.vm.write().show_completion(report);
    }
}

/// Keyboard shortcuts on the quiz screen: Enter or → reveals, then moves on; Space pauses.
#[must_use]
pub fn command_for_key(key: &Key, vm: &QuizScreenVm) -> Option<QuizCommand> {
    if vm.screen != QuizScreen::Quiz || !vm.controls.enabled {
        return None;
    }
    match key {
        Key::Enter | Key::ArrowRight => {
            if vm.controls.reveal_visible && !vm.paused {
                Some(QuizCommand::Reveal)
            } else if vm.controls.next_visible {
                Some(QuizCommand::Next)
            } else {
                None
            }
        }
        Key::Character(value) if value == " " => Some(QuizCommand::TogglePause),
        _ => None,
    }
}
