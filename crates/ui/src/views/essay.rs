use std::time::Duration;

use atheno_core::model::EssayId;
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::EssayServiceError;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::AlertDialog;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{EssaySaveState, EssayVm, RubricVm, essay_error_message};

const SAVED_NOTICE: Duration = Duration::from_secs(3);

fn failure_message(err: &EssayServiceError) -> String {
    match err {
        EssayServiceError::Essay(err) => essay_error_message(err),
        EssayServiceError::Api(err) => ViewError::from_api(err).message().to_string(),
        _ => ViewError::Unknown.message().to_string(),
    }
}

#[component]
pub fn EssayView(essay_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let essays = ctx.essay_writing();
    let vm = use_signal(|| None::<EssayVm>);

    let loader = essays.clone();
    let resource = use_resource(move || {
        let service = loader.clone();
        let mut vm = vm;
        async move {
            let composition = service
                .start(EssayId::new(essay_id))
                .await
                .map_err(ViewError::from)?;
            vm.set(Some(EssayVm::from_composition(composition)));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    let on_input = use_callback(move |text: String| {
        let mut vm = vm;
        if let Some(vm) = vm.write().as_mut() {
            vm.set_text(text);
        }
    });

    let save_service = essays.clone();
    let save_draft = use_callback(move |()| {
        let mut vm = vm;
        let composition = {
            let mut guard = vm.write();
            let Some(current) = guard.as_mut().filter(|current| current.can_save_draft()) else {
                return;
            };
            current.set_save_state(EssaySaveState::SavingDraft);
            current.composition().clone()
        };
        let service = save_service.clone();
        spawn(async move {
            let result = service.save_draft(&composition).await;
            let ticket = match vm.write().as_mut() {
                Some(current) => match result {
                    Ok(()) => Some(current.mark_draft_saved()),
                    Err(err) => {
                        current.set_save_state(EssaySaveState::Failed(failure_message(&err)));
                        None
                    }
                },
                None => None,
            };
            if let Some(ticket) = ticket {
                tokio::time::sleep(SAVED_NOTICE).await;
                if let Some(current) = vm.write().as_mut() {
                    current.clear_draft_notice(ticket);
                }
            }
        });
    });

    let submit_service = essays.clone();
    let submit = use_callback(move |()| {
        let mut vm = vm;
        let composition = {
            let mut guard = vm.write();
            let Some(current) = guard.as_mut().filter(|current| current.can_submit()) else {
                return;
            };
            current.set_save_state(EssaySaveState::Submitting);
            current.composition().clone()
        };
        let service = submit_service.clone();
        spawn(async move {
            let next = match service.submit(&composition).await {
                Ok(()) => EssaySaveState::Submitted,
                Err(err) => EssaySaveState::Failed(failure_message(&err)),
            };
            if let Some(current) = vm.write().as_mut() {
                current.set_save_state(next);
            }
        });
    });

    let close_alert = use_callback(move |()| {
        let mut vm = vm;
        let submitted = {
            let mut guard = vm.write();
            match guard.as_mut() {
                Some(current) if current.save_state() == &EssaySaveState::Submitted => true,
                Some(current) => {
                    current.set_save_state(EssaySaveState::Idle);
                    false
                }
                None => false,
            }
        };
        if submitted {
            let _ = navigator.replace(Route::StudentDashboard {});
        }
    });

    let leave = use_callback(move |()| {
        let _ = navigator.replace(Route::StudentDashboard {});
    });

    rsx! {
        div { class: "page page--essay",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading essay..." }
                },
                ViewState::Error(err) => rsx! {
                    AlertDialog {
                        title: "Essay unavailable",
                        message: err.message().to_string(),
                        on_close: leave,
                    }
                },
                ViewState::Ready(()) => match vm.read().clone() {
                    Some(current) => rsx! {
                        EssayEditor {
                            vm: current,
                            on_input,
                            on_save_draft: save_draft,
                            on_submit: submit,
                            on_close_alert: close_alert,
                        }
                    },
                    None => rsx! {
                        p { "Loading essay..." }
                    },
                },
            }
        }
    }
}

#[component]
fn EssayEditor(
    vm: EssayVm,
    on_input: Callback<String>,
    on_save_draft: Callback<()>,
    on_submit: Callback<()>,
    on_close_alert: Callback<()>,
) -> Element {
    let essay = vm.essay();
    let busy = vm.is_busy();
    let save_state = vm.save_state().clone();

    rsx! {
        header { class: "view-header",
            h2 { class: "view-title", "{essay.title()}" }
        }
        div { class: "view-divider" }

        section { class: "essay-prompt",
            h3 { "Prompt" }
            p { "{essay.prompt()}" }
        }

        RubricPanel { rubric: vm.rubric() }

        textarea {
            id: "essay-text",
            class: "essay-editor",
            rows: "16",
            placeholder: "Start writing...",
            disabled: busy,
            value: "{vm.text()}",
            oninput: move |evt| on_input.call(evt.value()),
        }

        div { class: "essay-status",
            span { class: vm.word_count_class(), "{vm.word_count_label()}" }
            if save_state == EssaySaveState::DraftSaved {
                span { class: "essay-saved", "Draft saved" }
            }
        }
        if let Some(warning) = vm.limit_warning() {
            p { class: "form-error", "{warning}" }
        }

        div { class: "essay-actions",
            button {
                class: "btn btn-secondary",
                r#type: "button",
                disabled: !vm.can_save_draft(),
                onclick: move |_| on_save_draft.call(()),
                if save_state == EssaySaveState::SavingDraft { "Saving..." } else { "Save draft" }
            }
            button {
                id: "essay-submit",
                class: "btn btn-primary",
                r#type: "button",
                disabled: !vm.can_submit(),
                onclick: move |_| on_submit.call(()),
                if save_state == EssaySaveState::Submitting { "Submitting..." } else { "Submit essay" }
            }
        }

        match save_state.clone() {
            EssaySaveState::Submitted => rsx! {
                AlertDialog {
                    title: "Essay submitted",
                    message: "Your teacher will grade it soon.".to_string(),
                    on_close: on_close_alert,
                }
            },
            EssaySaveState::Failed(message) => rsx! {
                AlertDialog {
                    title: "Something went wrong",
                    message,
                    on_close: on_close_alert,
                }
            },
            _ => rsx! {},
        }
    }
}

#[component]
fn RubricPanel(rubric: RubricVm) -> Element {
    rsx! {
        section { class: "rubric",
            h3 { "Rubric" }
            match rubric {
                RubricVm::Rows { rows, total_label } => rsx! {
                    table { class: "data-table",
                        tbody {
                            for row in rows {
                                tr { key: "{row.name}",
                                    th { "{row.name}" }
                                    td { "{row.description}" }
                                    td { "{row.max_label}" }
                                }
                            }
                        }
                        tfoot {
                            tr {
                                th { "Total" }
                                td {}
                                td { "{total_label}" }
                            }
                        }
                    }
                },
                RubricVm::Text(text) => rsx! {
                    p { "{text}" }
                },
            }
        }
    }
}
