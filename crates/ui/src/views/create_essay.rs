use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::{AlertDialog, ViewHeader};
use crate::vm::{EssayBuilderVm, FormStatus, authoring_error_message};

#[component]
pub fn CreateEssayView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let authoring = ctx.authoring();

    let mut builder = use_signal(EssayBuilderVm::default);
    let mut status = use_signal(|| FormStatus::Idle);
    let mut published = use_signal(|| None::<String>);

    let publish = use_callback(move |()| {
        if status.read().is_working() {
            return;
        }
        let draft = builder.read().draft();
        let authoring = authoring.clone();
        status.set(FormStatus::Working);
        spawn(async move {
            match authoring.create_essay(&draft).await {
                Ok(essay) => {
                    status.set(FormStatus::Idle);
                    builder.write().reset();
                    published.set(Some(essay.title().to_string()));
                }
                Err(err) => status.set(FormStatus::Failed(authoring_error_message(&err))),
            }
        });
    });

    let working = status.read().is_working();
    let error = status.read().error().map(str::to_string);
    let form = builder.read().clone();
    let can_remove = form.criteria().len() > 1;
    let total = form.total_points();

    rsx! {
        div { class: "page page--builder",
            ViewHeader { title: "Create essay" }

            if let Some(error) = error {
                p { class: "form-error", role: "alert", "{error}" }
            }

            label { class: "field",
                span { "Title" }
                input {
                    r#type: "text",
                    value: "{form.title()}",
                    oninput: move |evt| builder.write().set_title(evt.value()),
                }
            }
            label { class: "field",
                span { "Prompt" }
                textarea {
                    rows: "5",
                    value: "{form.prompt()}",
                    oninput: move |evt| builder.write().set_prompt(evt.value()),
                }
            }
            label { class: "field",
                span { "Word limit (optional)" }
                input {
                    r#type: "number",
                    min: "1",
                    value: "{form.word_limit()}",
                    oninput: move |evt| builder.write().set_word_limit(evt.value()),
                }
            }

            fieldset { class: "rubric-editor",
                legend { "Rubric" }
                for (index, criterion) in form.criteria().iter().cloned().enumerate() {
                    div { key: "{index}", class: "criterion-editor",
                        input {
                            r#type: "text",
                            placeholder: "Criterion",
                            value: "{criterion.name}",
                            oninput: move |evt| builder.write().set_criterion_name(index, evt.value()),
                        }
                        input {
                            r#type: "text",
                            placeholder: "Description",
                            value: "{criterion.description}",
                            oninput: move |evt| {
                                builder.write().set_criterion_description(index, evt.value());
                            },
                        }
                        input {
                            r#type: "number",
                            min: "1",
                            value: "{criterion.max_score}",
                            oninput: move |evt| {
                                builder.write().set_criterion_max_score(index, evt.value());
                            },
                        }
                        button {
                            class: "btn btn-link",
                            r#type: "button",
                            disabled: !can_remove,
                            onclick: move |_| builder.write().remove_criterion(index),
                            "Remove"
                        }
                    }
                }
                p { class: "field-hint", "Total: {total} pts" }
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| builder.write().add_criterion(),
                    "Add criterion"
                }
            }

            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: working,
                onclick: move |_| publish.call(()),
                if working { "Publishing..." } else { "Publish essay" }
            }

            if let Some(title) = published() {
                AlertDialog {
                    title: "Essay published",
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
