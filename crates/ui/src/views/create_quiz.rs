use atheno_core::model::{QuestionDraft, QuestionDraftKind};
use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::{AlertDialog, ViewHeader};
use crate::vm::{FormStatus, QuizBuilderVm, authoring_error_message};

#[component]
pub fn CreateQuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let authoring = ctx.authoring();

    let mut builder = use_signal(QuizBuilderVm::default);
    let mut status = use_signal(|| FormStatus::Idle);
    let mut published = use_signal(|| None::<String>);

    let publish = use_callback(move |()| {
        if status.read().is_working() {
            return;
        }
        let draft = builder.read().draft().clone();
        let authoring = authoring.clone();
        status.set(FormStatus::Working);
        spawn(async move {
            match authoring.create_quiz(&draft).await {
                Ok(quiz) => {
                    status.set(FormStatus::Idle);
                    builder.write().reset();
                    published.set(Some(quiz.title().to_string()));
                }
                Err(err) => status.set(FormStatus::Failed(authoring_error_message(&err))),
            }
        });
    });

    let working = status.read().is_working();
    let error = status.read().error().map(str::to_string);
    let form = builder.read().clone();
    let draft = form.draft();
    let questions = draft.questions.clone();

    rsx! {
        div { class: "page page--builder",
            ViewHeader { title: "Create quiz" }

            if let Some(error) = error {
                p { class: "form-error", role: "alert", "{error}" }
            }

            label { class: "field",
                span { "Title" }
                input {
                    r#type: "text",
                    value: "{draft.title}",
                    oninput: move |evt| builder.write().set_title(evt.value()),
                }
            }
            label { class: "field",
                span { "Description" }
                textarea {
                    rows: "3",
                    value: "{draft.description}",
                    oninput: move |evt| builder.write().set_description(evt.value()),
                }
            }

            for (index, question) in questions.into_iter().enumerate() {
                QuestionEditor {
                    key: "{index}",
                    index,
                    question,
                    builder,
                }
            }

            div { class: "toolbar",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| builder.write().add_multiple_choice(),
                    "Add multiple choice"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| builder.write().add_short_answer(),
                    "Add short answer"
                }
            }

            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: working,
                onclick: move |_| publish.call(()),
                if working { "Publishing..." } else { "Publish quiz" }
            }

            if let Some(title) = published() {
                AlertDialog {
                    title: "Quiz published",
                    message: format!("\"{title}\" is now available to students."),
                    on_close: move |()| {
                        published.set(None);
                        let _ = navigator.push(Route::TeacherDashboard {});
                    },
                }
            }
        }
    }
}

#[component]
fn QuestionEditor(index: usize, question: QuestionDraft, builder: Signal<QuizBuilderVm>) -> Element {
    let mut builder = builder;
    let number = index + 1;

    rsx! {
        fieldset { class: "question-editor",
            legend { "Question {number}" }
            label { class: "field",
                span { "Question text" }
                input {
                    r#type: "text",
                    value: "{question.text}",
                    oninput: move |evt| builder.write().set_question_text(index, evt.value()),
                }
            }
            match question.kind {
                QuestionDraftKind::MultipleChoice { options, correct } => rsx! {
                    p { class: "field-hint", "Select the correct option." }
                    for (option, label) in options.into_iter().enumerate() {
                        div { key: "{option}", class: "option-editor",
                            input {
                                r#type: "radio",
                                name: "correct-{index}",
                                checked: correct == Some(option),
                                onchange: move |_| builder.write().set_correct(index, option),
                            }
                            input {
                                r#type: "text",
                                placeholder: "Option {option + 1}",
                                value: "{label}",
                                oninput: move |evt| builder.write().set_option(index, option, evt.value()),
                            }
                            button {
                                class: "btn btn-link",
                                r#type: "button",
                                onclick: move |_| builder.write().remove_option(index, option),
                                "Remove"
                            }
                        }
                    }
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| builder.write().add_option(index),
                        "Add option"
                    }
                },
                QuestionDraftKind::ShortAnswer { expected } => rsx! {
                    label { class: "field",
                        span { "Expected answer" }
                        input {
                            r#type: "text",
                            value: "{expected}",
                            oninput: move |evt| builder.write().set_expected(index, evt.value()),
                        }
                    }
                },
            }
            button {
                class: "btn btn-link btn-danger",
                r#type: "button",
                onclick: move |_| builder.write().remove_question(index),
                "Remove question"
            }
        }
    }
}
