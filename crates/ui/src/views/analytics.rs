use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::components::{ErrorPanel, ViewHeader};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::map_quiz_reports;

#[component]
pub fn AnalyticsView() -> Element {
    let ctx = use_context::<AppContext>();
    let dashboards = ctx.dashboards();

    let resource = use_resource(move || {
        let dashboards = dashboards.clone();
        async move {
            let reports = dashboards.teacher_analytics().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_quiz_reports(&reports))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            ViewHeader { title: "Quiz analytics", subtitle: "Scores are computed by the server".to_string() }
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
                ViewState::Ready(rows) if rows.is_empty() => rsx! {
                    p { class: "empty-state", "Publish a quiz to see its results here." }
                },
                ViewState::Ready(rows) => rsx! {
                    table { class: "data-table",
                        thead {
                            tr {
                                th { "Quiz" }
                                th { "Average" }
                                th { "Submissions" }
                            }
                        }
                        tbody {
                            for row in rows {
                                tr { key: "{row.quiz_id}",
                                    td { "{row.title}" }
                                    td { "{row.average_label}" }
                                    td { "{row.submissions_label}" }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
