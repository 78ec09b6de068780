use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::{ErrorPanel, StatCards, ViewHeader};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ActivityRowVm, EssayCardVm, QuizCardVm, StudentDashboardVm, map_student_dashboard};

#[component]
pub fn StudentDashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let dashboards = ctx.dashboards();

    let resource = use_resource(move || {
        let dashboards = dashboards.clone();
        async move {
            let dashboard = dashboards.student_dashboard().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_student_dashboard(&dashboard))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            ViewHeader { title: "Student dashboard", subtitle: "Your assignments at a glance".to_string() }
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
                    DashboardBody { data }
                },
            }
        }
    }
}

#[component]
fn DashboardBody(data: StudentDashboardVm) -> Element {
    rsx! {
        StatCards { stats: data.stats.clone() }

        section { class: "dashboard-section",
            h3 { "Quizzes" }
            if data.quizzes.is_empty() {
                p { class: "empty-state", "No quizzes waiting for you." }
            }
            div { class: "card-grid",
                for quiz in data.quizzes.iter().cloned() {
                    PendingQuizCard { key: "{quiz.id}", quiz }
                }
            }
        }

        section { class: "dashboard-section",
            h3 { "Essays" }
            if data.essays.is_empty() {
                p { class: "empty-state", "No essays waiting for you." }
            }
            div { class: "card-grid",
                for essay in data.essays.iter().cloned() {
                    PendingEssayCard { key: "{essay.id}", essay }
                }
            }
        }

        section { class: "dashboard-section",
            h3 { "Recent activity" }
            if data.activity.is_empty() {
                p { class: "empty-state", "Nothing submitted yet." }
            } else {
                ActivityTable { rows: data.activity.clone() }
            }
        }
    }
}

#[component]
fn PendingQuizCard(quiz: QuizCardVm) -> Element {
    rsx! {
        article { class: "item-card",
            h4 { class: "item-card-title", "{quiz.title}" }
            if let Some(description) = quiz.description.as_ref() {
                p { class: "item-card-body", "{description}" }
            }
            p { class: "item-card-meta", "{quiz.questions_label}" }
            Link {
                class: "btn btn-primary",
                to: Route::TakeQuiz { quiz_id: quiz.id },
                "Start quiz"
            }
        }
    }
}

#[component]
fn PendingEssayCard(essay: EssayCardVm) -> Element {
    rsx! {
        article { class: "item-card",
            h4 { class: "item-card-title", "{essay.title}" }
            p { class: "item-card-body", "{essay.prompt_excerpt}" }
            p { class: "item-card-meta", "{essay.limit_label}" }
            Link {
                class: "btn btn-primary",
                to: Route::WriteEssay { essay_id: essay.id },
                "Write essay"
            }
        }
    }
}

#[component]
fn ActivityTable(rows: Vec<ActivityRowVm>) -> Element {
    rsx! {
        table { class: "data-table",
            thead {
                tr {
                    th { "Type" }
                    th { "Title" }
                    th { "Score" }
                    th { "Status" }
                    th { "Submitted" }
                }
            }
            tbody {
                for row in rows {
                    tr {
                        td { "{row.kind_label}" }
                        td { "{row.title}" }
                        td { "{row.score_label}" }
                        td { "{row.status}" }
                        td { "{row.date_label}" }
                    }
                }
            }
        }
    }
}
