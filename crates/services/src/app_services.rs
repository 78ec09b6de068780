use std::sync::Arc;

use api::{
    ApiConfig, Backend, FirebaseConfig, FirebaseIdentity, IdentityProvider, InMemoryBackend,
    LocalIdentity, TokenSource,
};

use crate::auth_service::AuthService;
use crate::authoring_service::AuthoringService;
use crate::dashboard_service::DashboardService;
use crate::error::AppServicesError;
use crate::essay_service::EssayWritingService;
use crate::quiz_service::QuizTakingService;
use crate::Clock;

/// Assembles app-facing services over one backend and identity provider.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthService>,
    quiz_taking: Arc<QuizTakingService>,
    essay_writing: Arc<EssayWritingService>,
    authoring: Arc<AuthoringService>,
    dashboards: Arc<DashboardService>,
}

impl AppServices {
    #[must_use]
    pub fn new(backend: &Backend, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            auth: Arc::new(AuthService::new(identity, Arc::clone(&backend.accounts))),
            quiz_taking: Arc::new(QuizTakingService::new(Arc::clone(&backend.quizzes))),
            essay_writing: Arc::new(EssayWritingService::new(Arc::clone(&backend.essays))),
            authoring: Arc::new(AuthoringService::new(
                Arc::clone(&backend.quizzes),
                Arc::clone(&backend.essays),
            )),
            dashboards: Arc::new(DashboardService::new(
                Arc::clone(&backend.accounts),
                Arc::clone(&backend.quizzes),
                Arc::clone(&backend.essays),
                Arc::clone(&backend.dashboards),
                Arc::clone(&backend.analytics),
            )),
        }
    }

    /// Services talking to the remote backend, signed in through the identity provider.
    #[must_use]
    pub fn online(api: ApiConfig, firebase: Option<FirebaseConfig>, clock: Clock) -> Self {
        if firebase.is_none() {
            log::warn!("no identity api key configured; sign-in will fail");
        }
        let identity = Arc::new(FirebaseIdentity::new(firebase, clock));
        let tokens: Arc<dyn TokenSource> = identity.clone();
        log::info!("using backend at {}", api.base_url());
        let backend = Backend::http(api, tokens);
        Self::new(&backend, identity)
    }

    /// Services backed by process memory and seeded with demo accounts.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Seed` if the demo content cannot be written.
    pub fn offline(clock: Clock) -> Result<Self, AppServicesError> {
        let identity = Arc::new(LocalIdentity::new(clock));
        let tokens: Arc<dyn TokenSource> = identity.clone();
        let memory = InMemoryBackend::new(tokens, clock);
        api::demo::seed(&identity, &memory).map_err(AppServicesError::Seed)?;
        let backend = Backend::in_memory(memory);
        Ok(Self::new(&backend, identity))
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
