use std::sync::Arc;

use services::{
    AppServices, AuthService, AuthoringService, DashboardService, EssayWritingService,
    QuizTakingService,
};

pub trait UiApp: Send + Sync {
    fn services(&self) -> AppServices;

    /// Offline builds sign in against seeded demo accounts.
    fn offline(&self) -> bool;
}

#[derive(Clone)]
pub struct AppContext {
    offline: bool,

    auth: Arc<AuthService>,
    quiz_taking: Arc<QuizTakingService>,
    essay_writing: Arc<EssayWritingService>,
    authoring: Arc<AuthoringService>,
    dashboards: Arc<DashboardService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let services = app.services();

        Self {
            offline: app.offline(),
            auth: services.auth(),
            quiz_taking: services.quiz_taking(),
            essay_writing: services.essay_writing(),
            authoring: services.authoring(),
            dashboards: services.dashboards(),
        }
    }

    #[must_use]
    pub fn offline(&self) -> bool {
        self.offline
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn quiz_taking(&self) -> Arc<QuizTakingService> {
        Arc::clone(&self.quiz_taking)
    }

    #[must_use]
    pub fn essay_writing(&self) -> Arc<EssayWritingService> {
        Arc::clone(&self.essay_writing)
    }

    #[must_use]
    pub fn authoring(&self) -> Arc<AuthoringService> {
        Arc::clone(&self.authoring)
    }

    #[must_use]
    pub fn dashboards(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboards)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
