use atheno_core::model::QuizId;
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::views::components::AlertDialog;
use crate::vm::{QuestionVm, QuizFlowPhase, QuizFlowVm, QuizIntent};

/// Arrow keys page through questions.
fn intent_for_key(key: &Key) -> Option<QuizIntent> {
    match key {
        Key::ArrowRight => Some(QuizIntent::Next),
        Key::ArrowLeft => Some(QuizIntent::Previous),
        _ => None,
    }
}

fn alert_title(leave: bool) -> &'static str {
    if leave { "Quiz unavailable" } else { "Submission failed" }
}

#[component]
pub fn QuizView(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let quiz_taking = ctx.quiz_taking();
    let vm = use_signal(QuizFlowVm::new);

    let loader = quiz_taking.clone();
    let _resource = use_resource(move || {
        let service = loader.clone();
        let mut vm = vm;
        async move {
            vm.write().begin_loading();
            let loaded = service
                .start(QuizId::new(quiz_id))
                .await
                .map_err(ViewError::from);
            vm.write().finish_loading(loaded);
        }
    });

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut vm = vm;
        vm.write().apply(intent);
    });

    let submit = use_callback(move |()| {
        let mut vm = vm;
        let Some(attempt) = vm.write().begin_submit() else {
            return;
        };
        let service = quiz_taking.clone();
        spawn(async move {
            let result = service.submit(&attempt).await.map_err(ViewError::from);
            vm.write().finish_submit(result);
        });
    });

    let close_alert = use_callback(move |()| {
        let mut vm = vm;
        let alert = vm.write().dismiss_alert();
        if alert.is_some_and(|alert| alert.leave) {
            let _ = navigator.replace(Route::StudentDashboard {});
        }
    });

    let on_key = use_callback(move |evt: KeyboardEvent| {
        if let Some(intent) = intent_for_key(&evt.data.key()) {
            evt.prevent_default();
            dispatch.call(intent);
        }
    });

    let snapshot = vm.read();
    let phase = snapshot.phase();
    let title = snapshot.title().unwrap_or("Quiz").to_string();
    let question = snapshot.question();
    let progress = snapshot.progress_percent();
    let answered = snapshot.answered_label();
    let alert = snapshot.alert().cloned();
    drop(snapshot);

    rsx! {
        div { class: "page page--quiz", tabindex: "0", onkeydown: on_key,
            match phase {
                QuizFlowPhase::Idle | QuizFlowPhase::Loading => rsx! {
                    p { "Loading quiz..." }
                },
                QuizFlowPhase::Error(err) => rsx! {
                    p { "{err.message()}" }
                    Link { to: Route::StudentDashboard {}, "Back to dashboard" }
                },
                QuizFlowPhase::Done { score_percent } => rsx! {
                    div { class: "quiz-result",
                        h2 { "Quiz submitted!" }
                        p { class: "quiz-score", "Your score: {score_percent}%" }
                        Link {
                            class: "btn btn-primary",
                            to: Route::StudentDashboard {},
                            "Back to dashboard"
                        }
                    }
                },
                QuizFlowPhase::Ready | QuizFlowPhase::Submitting => rsx! {
                    header { class: "view-header",
                        h2 { class: "view-title", "{title}" }
                        p { class: "view-subtitle", "{answered}" }
                    }
                    div { class: "progress",
                        div { class: "progress-bar", style: "width: {progress}%" }
                    }
                    if let Some(question) = question {
                        QuestionCard {
                            question,
                            submitting: phase == QuizFlowPhase::Submitting,
                            on_intent: dispatch,
                            on_submit: submit,
                        }
                    }
                },
            }

            if let Some(alert) = alert {
                AlertDialog {
                    title: alert_title(alert.leave),
                    message: alert.message,
                    on_close: close_alert,
                }
            }
        }
    }
}

#[component]
fn QuestionCard(
    question: QuestionVm,
    submitting: bool,
    on_intent: Callback<QuizIntent>,
    on_submit: Callback<()>,
) -> Element {
    rsx! {
        section { class: "question-card",
            p { class: "question-number", "{question.number_label}" }
            h3 { class: "question-prompt", "{question.prompt}" }

            if let Some(text) = question.text_answer.clone() {
                input {
                    class: "short-answer",
                    r#type: "text",
                    placeholder: "Type your answer",
                    value: "{text}",
                    disabled: submitting,
                    oninput: move |evt| on_intent.call(QuizIntent::Write(evt.value())),
                    onkeydown: move |evt| evt.stop_propagation(),
                }
            } else {
                ul { class: "option-list",
                    for option in question.options.iter().cloned() {
                        li { key: "{option.index}",
                            button {
                                class: if option.selected { "option option--selected" } else { "option" },
                                r#type: "button",
                                disabled: submitting,
                                onclick: move |_| on_intent.call(QuizIntent::Choose(option.index)),
                                "{option.label}"
                            }
                        }
                    }
                }
            }

            div { class: "question-nav",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: question.is_first || submitting,
                    onclick: move |_| on_intent.call(QuizIntent::Previous),
                    "Previous"
                }
                if question.is_last {
                    button {
                        id: "quiz-submit",
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: submitting,
                        onclick: move |_| on_submit.call(()),
                        if submitting { "Submitting..." } else { "Submit quiz" }
                    }
                } else {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: submitting,
                        onclick: move |_| on_intent.call(QuizIntent::Next),
                        "Next"
                    }
                }
            }
        }
    }
}
