use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::components::{ErrorPanel, ViewHeader};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::StudentProgressVm;

#[component]
pub fn ProgressView() -> Element {
    let ctx = use_context::<AppContext>();
    let dashboards = ctx.dashboards();

    let resource = use_resource(move || {
        let dashboards = dashboards.clone();
        async move {
            let progress = dashboards.student_progress().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(StudentProgressVm::from(&progress))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            ViewHeader { title: "My progress" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    ErrorPanel {
                        error: err,
                        on_retry: move |()| {
                            let mut resource = resource;
                            resource.restart();
                        },
                    }
                },
                ViewState::Ready(progress) => rsx! {
                    p { class: "view-subtitle", "Averages for {progress.name}" }
                    dl { class: "summary",
                        dt { "Average quiz score" }
                        dd { "{progress.quiz_average_label}" }

                        dt { "Average essay score" }
                        dd { "{progress.essay_average_label}" }
                    }
                },
            }
        }
    }
}
