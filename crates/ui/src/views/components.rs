use dioxus::prelude::*;

use crate::views::ViewError;
use crate::vm::StatCardVm;

/// Blocking message with a single acknowledge button.
#[component]
pub fn AlertDialog(title: &'static str, message: String, on_close: Callback<()>) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal",
                role: "alertdialog",
                onclick: move |evt| evt.stop_propagation(),
                h3 { class: "modal-title", "{title}" }
                p { class: "modal-body", "{message}" }
                div { class: "modal-actions",
                    button {
                        id: "alert-ok",
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "OK"
                    }
                }
            }
        }
    }
}

#[component]
pub fn ErrorPanel(error: ViewError, on_retry: Callback<()>) -> Element {
    rsx! {
        div { class: "error-panel",
            p { "{error.message()}" }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| on_retry.call(()),
                "Retry"
            }
        }
    }
}

#[component]
pub fn StatCards(stats: Vec<StatCardVm>) -> Element {
    rsx! {
        div { class: "stat-grid",
            for stat in stats {
                div { key: "{stat.label}", class: "stat-card",
                    span { class: "stat-value", "{stat.value}" }
                    span { class: "stat-label", "{stat.label}" }
                }
            }
        }
    }
}

#[component]
pub fn ViewHeader(title: &'static str, subtitle: Option<String>) -> Element {
    rsx! {
        header { class: "view-header",
            h2 { class: "view-title", "{title}" }
            if let Some(subtitle) = subtitle {
                p { class: "view-subtitle", "{subtitle}" }
            }
        }
        div { class: "view-divider" }
    }
}
