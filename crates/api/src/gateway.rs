use std::sync::Arc;

use async_trait::async_trait;
use atheno_core::model::{
    Essay, EssayId, EssaySubmission, NewEssay, NewQuiz, Quiz, QuizAnalytics, QuizId, QuizResult,
    QuizSubmission, Role, StudentAnalytics, StudentDashboard, User, UserId,
};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::HttpBackend;
use crate::identity::TokenSource;
use crate::memory::InMemoryBackend;

/// Payload linking a fresh identity to a backend user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub role: Role,
    pub identity_uid: String,
}

#[async_trait]
pub trait AccountGateway: Send + Sync {
    /// The backend user behind the current bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingToken` when signed out, or any request error.
    async fn current_user(&self) -> Result<User, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the backend refuses the registration.
    async fn register(&self, registration: &Registration) -> Result<User, ApiError>;
}

#[async_trait]
pub trait QuizGateway: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for unknown ids, or any request error.
    async fn quiz(&self, id: QuizId) -> Result<Quiz, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the quiz cannot be created.
    async fn create_quiz(&self, quiz: &NewQuiz) -> Result<Quiz, ApiError>;

    /// Send a complete answer set; the backend grades it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the submission is refused or the request fails.
    async fn submit_quiz(&self, submission: &QuizSubmission) -> Result<QuizResult, ApiError>;

    /// Quizzes authored by the current teacher.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the list cannot be fetched.
    async fn teacher_quizzes(&self) -> Result<Vec<Quiz>, ApiError>;
}

#[async_trait]
pub trait EssayGateway: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for unknown ids, or any request error.
    async fn essay(&self, id: EssayId) -> Result<Essay, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the essay cannot be created.
    async fn create_essay(&self, essay: &NewEssay) -> Result<Essay, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the submission is refused or the request fails.
    async fn submit_essay(&self, submission: &EssaySubmission) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the draft is refused or the request fails.
    async fn save_draft(&self, draft: &EssaySubmission) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the list cannot be fetched.
    async fn teacher_essays(&self) -> Result<Vec<Essay>, ApiError>;
}

#[async_trait]
pub trait DashboardGateway: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` if the dashboard cannot be fetched.
    async fn student_dashboard(&self) -> Result<StudentDashboard, ApiError>;
}

#[async_trait]
pub trait AnalyticsGateway: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` if the analytics cannot be fetched.
    async fn quiz_analytics(&self, quiz_id: QuizId) -> Result<QuizAnalytics, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` if the analytics cannot be fetched.
    async fn student_analytics(&self, student_id: UserId) -> Result<StudentAnalytics, ApiError>;
}

/// Aggregates the gateways behind trait objects so the backend can be swapped.
#[derive(Clone)]
pub struct Backend {
    pub accounts: Arc<dyn AccountGateway>,
    pub quizzes: Arc<dyn QuizGateway>,
    pub essays: Arc<dyn EssayGateway>,
    pub dashboards: Arc<dyn DashboardGateway>,
    pub analytics: Arc<dyn AnalyticsGateway>,
}

impl Backend {
    #[must_use]
    pub fn http(config: ApiConfig, tokens: Arc<dyn TokenSource>) -> Self {
        Self::from_shared(HttpBackend::new(config, tokens))
    }

    #[must_use]
    pub fn in_memory(backend: InMemoryBackend) -> Self {
        Self::from_shared(backend)
    }

    fn from_shared<B>(backend: B) -> Self
    where
        B: AccountGateway
            + QuizGateway
            + EssayGateway
            + DashboardGateway
            + AnalyticsGateway
            + Clone
            + 'static,
    {
        let accounts: Arc<dyn AccountGateway> = Arc::new(backend.clone());
        let quizzes: Arc<dyn QuizGateway> = Arc::new(backend.clone());
        let essays: Arc<dyn EssayGateway> = Arc::new(backend.clone());
        let dashboards: Arc<dyn DashboardGateway> = Arc::new(backend.clone());
        let analytics: Arc<dyn AnalyticsGateway> = Arc::new(backend);
        Self {
            accounts,
            quizzes,
            essays,
            dashboards,
            analytics,
        }
    }
}
