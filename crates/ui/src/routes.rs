use atheno_core::model::{Role, User};
use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use crate::context::AppContext;
use crate::views::{
    AnalyticsView, CreateEssayView, CreateQuizView, EssayView, ProgressView, QuizView,
    SignInView, SignUpView, StudentDashboardView, TeacherDashboardView, ViewError, ViewState,
    view_state_from_resource,
};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/", SignInView)] SignIn {},
    #[route("/signup", SignUpView)] SignUp {},
    #[layout(StudentLayout)]
        #[route("/student/dashboard", StudentDashboardView)] StudentDashboard {},
        #[route("/student/quiz/:quiz_id", QuizView)] TakeQuiz { quiz_id: u64 },
        #[route("/student/essay/:essay_id", EssayView)] WriteEssay { essay_id: u64 },
        #[route("/student/progress", ProgressView)] StudentProgress {},
    #[end_layout]
    #[layout(TeacherLayout)]
        #[route("/teacher/dashboard", TeacherDashboardView)] TeacherDashboard {},
        #[route("/teacher/create-quiz", CreateQuizView)] CreateQuiz {},
        #[route("/teacher/create-essay", CreateEssayView)] CreateEssay {},
        #[route("/teacher/analytics", AnalyticsView)] Analytics {},
    #[end_layout]
    #[route("/:..segments", UnknownRoute)] Unknown { segments: Vec<String> },
}

/// Landing page for a signed-in user of `role`.
#[must_use]
pub fn home_route(role: Role) -> Route {
    match role {
        Role::Teacher => Route::TeacherDashboard {},
        Role::Student => Route::StudentDashboard {},
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GuardDecision {
    /// Session check still in flight.
    Wait,
    Allow(User),
    SignIn,
    Redirect(Route),
    Failed(ViewError),
}

/// What a role-restricted layout does with the current session check.
#[must_use]
pub fn guard_decision(required: Role, session: &ViewState<Option<User>>) -> GuardDecision {
    match session {
        ViewState::Idle | ViewState::Loading => GuardDecision::Wait,
        ViewState::Ready(None) | ViewState::Error(ViewError::Unauthenticated) => {
            GuardDecision::SignIn
        }
        ViewState::Ready(Some(user)) if user.role == required => GuardDecision::Allow(user.clone()),
        ViewState::Ready(Some(user)) => GuardDecision::Redirect(home_route(user.role)),
        ViewState::Error(err) => GuardDecision::Failed(*err),
    }
}

#[component]
fn StudentLayout() -> Element {
    rsx! { RoleShell { role: Role::Student } }
}

#[component]
fn TeacherLayout() -> Element {
    rsx! { RoleShell { role: Role::Teacher } }
}

#[component]
fn RoleShell(role: Role) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();

    let resource = use_resource(move || {
        let auth = auth.clone();
        async move {
            auth.current_user()
                .await
                .inspect_err(|err| log::warn!("session check failed: {err}"))
                .map_err(ViewError::from)
        }
    });

    use_effect(move || {
        let session = view_state_from_resource(&resource);
        match guard_decision(role, &session) {
            GuardDecision::SignIn => {
                log::debug!("no session; redirecting to sign in");
                let _ = navigator.replace(Route::SignIn {});
            }
            GuardDecision::Redirect(route) => {
                let _ = navigator.replace(route);
            }
            GuardDecision::Wait | GuardDecision::Allow(_) | GuardDecision::Failed(_) => {}
        }
    });

    let session = view_state_from_resource(&resource);
    match guard_decision(role, &session) {
        GuardDecision::Allow(user) => rsx! {
            div { class: "app",
                Sidebar { user }
                main { class: "content",
                    Outlet::<Route> {}
                }
            }
        },
        GuardDecision::Failed(err) => rsx! {
            div { class: "page",
                p { "{err.message()}" }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let mut resource = resource;
                        resource.restart();
                    },
                    "Retry"
                }
            }
        },
        GuardDecision::Wait | GuardDecision::SignIn | GuardDecision::Redirect(_) => rsx! {
            div { class: "page page--centered",
                p { "Checking your session..." }
            }
        },
    }
}

#[component]
fn Sidebar(user: User) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();
    let on_sign_out = move |_| {
        auth.sign_out();
        let _ = navigator.replace(Route::SignIn {});
    };

    rsx! {
        nav { class: "sidebar",
            h1 { "Atheno" }
            p { class: "sidebar-user", "{user.display_name()}" }
            ul {
                if user.is_teacher() {
                    li { Link { to: Route::TeacherDashboard {}, "Dashboard" } }
                    li { Link { to: Route::CreateQuiz {}, "Create quiz" } }
                    li { Link { to: Route::CreateEssay {}, "Create essay" } }
                    li { Link { to: Route::Analytics {}, "Analytics" } }
                } else {
                    li { Link { to: Route::StudentDashboard {}, "Dashboard" } }
                    li { Link { to: Route::StudentProgress {}, "Progress" } }
                }
            }
            button {
                class: "btn btn-secondary sidebar-sign-out",
                r#type: "button",
                onclick: on_sign_out,
                "Sign out"
            }
        }
    }
}

#[component]
fn UnknownRoute(segments: Vec<String>) -> Element {
    let navigator = use_navigator();
    log::debug!("unknown route /{}", segments.join("/"));
    use_effect(move || {
        let _ = navigator.replace(Route::SignIn {});
    });
    rsx! {
        div { class: "page",
            p { "Page not found. Taking you to sign in..." }
        }
    }
}
