use dioxus::prelude::*;
use quiz_core::model::{QuestionBank, QuestionLimit};
use services::{QuizCommand, QuizLoop, SilentAudio};
use tokio::sync::mpsc::unbounded_channel;

use super::audio::{QuizAudio, WebviewAudio};
use crate::context::{AppContext, AudioSource};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizScreen, QuizScreenVm, SignalSurface, command_for_key};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;
#[cfg(test)]
use tokio::sync::mpsc::UnboundedSender;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let question_bank = ctx.question_bank();
    let mut resource = use_resource(move || {
        let question_bank = question_bank.clone();
        async move {
            question_bank
                .load()
                .await
                .map_err(|err| ViewError::from(&err))
        }
    });
    let state = view_state_from_resource(&resource);
    let reload = use_callback(move |()| {
        resource.restart();
    });

    #[cfg(test)]
    {
        if let Some(handles) = try_consume_context::<QuizTestHandles>() {
            handles.register_reload(reload);
        }
    }

    rsx! {
        div { class: "page quiz-page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    div { id: "loading", class: "loading",
                        p { "Loading questions..." }
                    }
                },
                ViewState::Error(err) => rsx! {
                    div { id: "loading", class: "loading error",
                        p { class: "error-text", "Error: {err.message()}" }
                        button { id: "reload-btn", onclick: move |_| reload.call(()), "Reload" }
                    }
                },
                ViewState::Ready(bank) => rsx! {
                    QuizRunner { bank }
                },
            }
        }
    }
}

/// Owns the quiz loop for one loaded bank and renders whatever it writes to the screen.
#[component]
fn QuizRunner(bank: QuestionBank) -> Element {
    let ctx = use_context::<AppContext>();
    let settings = ctx.settings();
    let vm = use_signal(QuizScreenVm::default);
    let mut limit_text = use_signal(String::new);
    let mut autoplay = use_signal(|| settings.autoplay());

    let commands = use_hook(|| {
        let (commands, rx) = unbounded_channel();
        let audio = match ctx.audio() {
            AudioSource::Muted => QuizAudio::Silent(SilentAudio),
            AudioSource::Directory(root) => QuizAudio::Webview(WebviewAudio::new(
                root.clone(),
                dioxus::document::document(),
            )),
        };
        let quiz = QuizLoop::new(bank.clone(), settings, SignalSurface::new(vm), audio);
        spawn(async move {
            let report = quiz.run(rx).await;
            tracing::debug!(answered = ?report.map(|r| r.answered()), "quiz view closed");
        });
        commands
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(commands.clone(), vm);
            }
        }
    }

    let dispatch = use_callback(move |command: QuizCommand| {
        if commands.send(command).is_err() {
            tracing::warn!(?command, "quiz loop is not running");
        }
    });

    let on_start = move |_: MouseEvent| {
        let limit = QuestionLimit::parse(&limit_text.read());
        dispatch.call(QuizCommand::SetAutoplay(autoplay()));
        dispatch.call(QuizCommand::Start(limit));
    };
    let on_keydown = move |evt: KeyboardEvent| {
        if let Some(command) = command_for_key(&evt.key(), &vm.read()) {
            evt.prevent_default();
            dispatch.call(command);
        }
    };

    let snapshot = vm.read().clone();
    let controls = snapshot.controls();

    rsx! {
        div { id: "quiz-root", class: "quiz", tabindex: "0", onkeydown: on_keydown,
            match snapshot.screen() {
                QuizScreen::Setup => rsx! {
                    div { id: "setup-screen", class: "setup",
                        label { r#for: "question-limit", "Number of questions" }
                        input {
                            id: "question-limit",
                            r#type: "number",
                            min: "1",
                            placeholder: "∞",
                            value: "{limit_text}",
                            oninput: move |evt| limit_text.set(evt.value()),
                        }
                        label { class: "autoplay",
                            input {
                                r#type: "checkbox",
                                checked: autoplay(),
                                onchange: move |evt| autoplay.set(evt.checked()),
                            }
                            " Autoplay"
                        }
                        button { id: "start-btn", class: "primary", onclick: on_start, "Start Quiz" }
                    }
                },
                QuizScreen::Quiz => rsx! {
                    div { id: "quiz-screen", class: "quiz-screen",
                        div { class: "progress",
                            span { id: "current-count", "{snapshot.answered()}" }
                            " "
                            span { id: "total-questions", "{snapshot.limit_label()}" }
                            span { class: "timer-label", "{snapshot.remaining_secs()}s" }
                        }
                        div { class: "timer",
                            div {
                                id: "timer-bar",
                                class: "timer-bar",
                                style: "width: {snapshot.timer_width()}",
                            }
                        }
                        p { id: "question-text", class: "question", "{snapshot.question()}" }
                        if let Some(answer) = snapshot.answer() {
                            div { id: "answer-box", class: "answer-box",
                                p { id: "answer-text", "{answer}" }
                                if let Some(source) = snapshot.source() {
                                    a { id: "source-link", href: "{source}", target: "_blank", "Source" }
                                }
                            }
                        }
                        div { class: "controls",
                            if controls.reveal_visible {
                                button {
                                    id: "reveal-btn",
                                    class: "primary",
                                    disabled: !controls.enabled,
                                    onclick: move |_| dispatch.call(QuizCommand::Reveal),
                                    "Reveal Answer"
                                }
                            }
                            if controls.next_visible {
                                button {
                                    id: "next-btn",
                                    class: "primary",
                                    onclick: move |_| dispatch.call(QuizCommand::Next),
                                    "Next Question"
                                }
                            }
                            button {
                                id: "pause-btn",
                                disabled: !controls.enabled,
                                onclick: move |_| dispatch.call(QuizCommand::TogglePause),
                                "{snapshot.pause_label()}"
                            }
                            button {
                                id: "end-btn",
                                onclick: move |_| dispatch.call(QuizCommand::End),
                                "Finish"
                            }
                            label { class: "autoplay",
                                input {
                                    id: "autoplay-checkbox",
                                    r#type: "checkbox",
                                    checked: autoplay(),
                                    onchange: move |evt| {
                                        let enabled = evt.checked();
                                        autoplay.set(enabled);
                                        dispatch.call(QuizCommand::SetAutoplay(enabled));
                                    },
                                }
                                " Autoplay"
                            }
                        }
                    }
                },
                QuizScreen::Complete => rsx! {
                    div { id: "complete-screen", class: "complete",
                        h2 { "Quiz Complete!" }
                        if let Some(message) = snapshot.completion_message() {
                            p { "{message}" }
                        }
                        button {
                            id: "play-again-btn",
                            class: "primary",
                            onclick: move |_| dispatch.call(QuizCommand::Reset),
                            "Play again"
                        }
                    }
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    commands: Rc<RefCell<Option<UnboundedSender<QuizCommand>>>>,
    vm: Rc<RefCell<Option<Signal<QuizScreenVm>>>>,
    reload: Rc<RefCell<Option<Callback>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(
        &self,
        commands: UnboundedSender<QuizCommand>,
        vm: Signal<QuizScreenVm>,
    ) {
        *self.commands.borrow_mut() = Some(commands);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn register_reload(&self, reload: Callback) {
        *self.reload.borrow_mut() = Some(reload);
    }

    /// Same as pressing Reload; must run inside the dom's runtime.
    pub(crate) fn reload(&self) {
        let reload = *self.reload.borrow();
        reload.expect("reload registered").call(());
    }

    pub(crate) fn send(&self, command: QuizCommand) {
        self.commands
            .borrow()
            .as_ref()
            .expect("quiz commands registered")
            .send(command)
            .expect("quiz loop running");
    }

    pub(crate) fn is_registered(&self) -> bool {
        self.vm.borrow().is_some()
    }
}
