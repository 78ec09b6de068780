use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::{ErrorPanel, StatCards, ViewHeader};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{TeacherDashboardVm, map_teacher_dashboard};

#[component]
pub fn TeacherDashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let dashboards = ctx.dashboards();

    let resource = use_resource(move || {
        let dashboards = dashboards.clone();
        async move {
            let dashboard = dashboards.teacher_dashboard().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_teacher_dashboard(&dashboard))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            ViewHeader { title: "Teacher dashboard", subtitle: "Quizzes and essays you have published".to_string() }
            div { class: "toolbar",
                Link { class: "btn btn-primary", to: Route::CreateQuiz {}, "New quiz" }
                Link { class: "btn btn-primary", to: Route::CreateEssay {}, "New essay" }
            }
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
                ViewState::Ready(data) => rsx! {
                    TeacherBody { data }
                },
            }
        }
    }
}

#[component]
fn TeacherBody(data: TeacherDashboardVm) -> Element {
    rsx! {
        StatCards { stats: data.stats.clone() }

        section { class: "dashboard-section",
            h3 { "Your quizzes" }
            if data.quizzes.is_empty() {
                p { class: "empty-state", "No quizzes yet. Create one to get started." }
            }
            ul { class: "item-list",
                for quiz in data.quizzes.iter() {
                    li { key: "{quiz.id}",
                        span { class: "item-list-title", "{quiz.title}" }
                        span { class: "item-list-meta", "{quiz.questions_label} · {quiz.created_label}" }
                    }
                }
            }
        }

        section { class: "dashboard-section",
            h3 { "Your essays" }
            if data.essays.is_empty() {
                p { class: "empty-state", "No essays yet." }
            }
            ul { class: "item-list",
                for essay in data.essays.iter() {
                    li { key: "{essay.id}",
                        span { class: "item-list-title", "{essay.title}" }
                        span { class: "item-list-meta", "{essay.limit_label} · {essay.created_label}" }
                    }
                }
            }
        }
    }
}
