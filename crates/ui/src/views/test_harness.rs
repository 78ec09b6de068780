use std::sync::Arc;

use api::demo::{DEMO_PASSWORD, DEMO_STUDENT_EMAIL, DEMO_TEACHER_EMAIL};
use api::{ApiError, Backend, DashboardGateway, InMemoryBackend, LocalIdentity, TokenSource};
use async_trait::async_trait;
use atheno_core::model::StudentDashboard;
use atheno_core::time::fixed_clock;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::AppServices;

use crate::context::{UiApp, build_app_context};
use crate::views::{
    AnalyticsView, CreateEssayView, CreateQuizView, EssayView, ProgressView, QuizView,
    SignInView, StudentDashboardView, TeacherDashboardView,
};

pub const FRACTIONS_QUIZ: &str = "Fractions warm-up";
pub const ROME_ESSAY: &str = "The fall of Rome";

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn services(&self) -> AppServices {
        self.services.clone()
    }

    fn offline(&self) -> bool {
        true
    }
}

/// Which demo account is signed in when the view mounts.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Visitor {
    Anonymous,
    Student,
    Teacher,
}

/// `Quiz(0)` and `Essay(0)` resolve to the seeded fractions quiz and Rome essay.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    SignIn,
    StudentDashboard,
    Quiz(u64),
    Essay(u64),
    Progress,
    TeacherDashboard,
    Analytics,
    CreateQuiz,
    CreateEssay,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::SignIn => rsx! { SignInView {} },
        ViewKind::StudentDashboard => rsx! { StudentDashboardView {} },
        ViewKind::Quiz(quiz_id) => rsx! { QuizView { quiz_id } },
        ViewKind::Essay(essay_id) => rsx! { EssayView { essay_id } },
        ViewKind::Progress => rsx! { ProgressView {} },
        ViewKind::TeacherDashboard => rsx! { TeacherDashboardView {} },
        ViewKind::Analytics => rsx! { AnalyticsView {} },
        ViewKind::CreateQuiz => rsx! { CreateQuizView {} },
        ViewKind::CreateEssay => rsx! { CreateEssayView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Dashboard gateway that is always down.
pub struct UnavailableDashboards;

#[async_trait]
impl DashboardGateway for UnavailableDashboards {
    async fn student_dashboard(&self) -> Result<StudentDashboard, ApiError> {
        Err(ApiError::Status(503))
    }
}

pub async fn setup_view_harness(view: ViewKind, visitor: Visitor) -> ViewHarness {
    let services = AppServices::offline(fixed_clock()).expect("offline services");
    setup_view_harness_with_services(view, visitor, services).await
}

/// Seeded in-memory backend with its dashboard gateway swapped for `dashboards`.
pub async fn setup_view_harness_with_dashboards(
    view: ViewKind,
    visitor: Visitor,
    dashboards: Arc<dyn DashboardGateway>,
) -> ViewHarness {
    let identity = Arc::new(LocalIdentity::new(fixed_clock()));
    let tokens: Arc<dyn TokenSource> = identity.clone();
    let memory = InMemoryBackend::new(tokens, fixed_clock());
    api::demo::seed(&identity, &memory).expect("seed demo content");
    let backend = Backend {
        dashboards,
        ..Backend::in_memory(memory)
    };
    let services = AppServices::new(&backend, identity);
    setup_view_harness_with_services(view, visitor, services).await
}

pub async fn setup_view_harness_with_services(
    view: ViewKind,
    visitor: Visitor,
    services: AppServices,
) -> ViewHarness {
    let auth = services.auth();
    match visitor {
        Visitor::Anonymous => {}
        Visitor::Student => {
            auth.sign_in(DEMO_STUDENT_EMAIL, DEMO_PASSWORD)
                .await
                .expect("student sign in");
        }
        Visitor::Teacher => {
            auth.sign_in(DEMO_TEACHER_EMAIL, DEMO_PASSWORD)
                .await
                .expect("teacher sign in");
        }
    }

    let view = match view {
        ViewKind::Quiz(0) => ViewKind::Quiz(seeded_quiz_id(&services, FRACTIONS_QUIZ).await),
        ViewKind::Essay(0) => ViewKind::Essay(seeded_essay_id(&services, ROME_ESSAY).await),
        other => other,
    };

    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, services }
}

async fn seeded_quiz_id(services: &AppServices, title: &str) -> u64 {
    let dashboard = services
        .dashboards()
        .student_dashboard()
        .await
        .expect("student dashboard");
    dashboard
        .pending_quizzes
        .iter()
        .find(|quiz| quiz.title == title)
        .map(|quiz| quiz.id.value())
        .expect("seeded quiz")
}

async fn seeded_essay_id(services: &AppServices, title: &str) -> u64 {
    let dashboard = services
        .dashboards()
        .student_dashboard()
        .await
        .expect("student dashboard");
    dashboard
        .pending_essays
        .iter()
        .find(|essay| essay.title == title)
        .map(|essay| essay.id.value())
        .expect("seeded essay")
}
