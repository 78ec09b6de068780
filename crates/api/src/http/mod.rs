//! Authenticated REST client for the remote backend.

use std::sync::Arc;

use async_trait::async_trait;
use atheno_core::model::{
    Essay, EssayId, EssaySubmission, NewEssay, NewQuiz, Quiz, QuizAnalytics, QuizId, QuizResult,
    QuizSubmission, StudentAnalytics, StudentDashboard, User, UserId,
};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::gateway::{
    AccountGateway, AnalyticsGateway, DashboardGateway, EssayGateway, QuizGateway, Registration,
};
use crate::identity::TokenSource;

mod wire;

use wire::{
    ContentBody, EssayDto, NewEssayBody, NewQuizBody, QuizAnalyticsDto, QuizDto, QuizResultDto,
    RegisterBody, StudentAnalyticsDto, StudentDashboardDto, SubmitQuizBody, UserDto,
};

/// Every call fetches a fresh bearer token; nothing is retried or cached.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    config: ApiConfig,
    tokens: Arc<dyn TokenSource>,
}

impl HttpBackend {
    #[must_use]
    pub fn new(config: ApiConfig, tokens: Arc<dyn TokenSource>) -> Self {
        Self {
            client: Client::new(),
            config,
            tokens,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Request builder with the bearer token attached.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingToken` if nobody is signed in.
    pub async fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.tokens.bearer_token().await?;
        Ok(self
            .client
            .request(method, self.config.endpoint(path))
            .bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|err| {
            log::warn!("request to {path} failed: {err}");
            ApiError::from(err)
        })?;
        let status = response.status().as_u16();
        if let Some(err) = ApiError::from_status(status) {
            log::warn!("{path} responded with {status}");
            return Err(err);
        }
        log::debug!("{path} -> {status}");
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.authorized(Method::GET, path).await?;
        let response = self.send(request, path).await?;
        Ok(response.json().await?)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = self.authorized(Method::POST, path).await?.json(body);
        let response = self.send(request, path).await?;
        Ok(response.json().await?)
    }

    async fn post_unit<B>(&self, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: serde::Serialize + Sync,
    {
        let request = self.authorized(Method::POST, path).await?.json(body);
        self.send(request, path).await?;
        Ok(())
    }
}

#[async_trait]
impl AccountGateway for HttpBackend {
    async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json::<UserDto>("/auth/me").await?.into_user()
    }

    async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        let body = RegisterBody::from(registration);
        self.post_json::<_, UserDto>("/auth/register", &body)
            .await?
            .into_user()
    }
}

#[async_trait]
impl QuizGateway for HttpBackend {
    async fn quiz(&self, id: QuizId) -> Result<Quiz, ApiError> {
        self.get_json::<QuizDto>(&format!("/quizzes/{id}"))
            .await?
            .into_quiz()
    }

    async fn create_quiz(&self, quiz: &NewQuiz) -> Result<Quiz, ApiError> {
        let body = NewQuizBody::from(quiz);
        self.post_json::<_, QuizDto>("/quizzes/", &body)
            .await?
            .into_quiz()
    }

    async fn submit_quiz(&self, submission: &QuizSubmission) -> Result<QuizResult, ApiError> {
        let path = format!("/quizzes/{}/submit", submission.quiz_id());
        let body = SubmitQuizBody::from(submission);
        let result: QuizResultDto = self.post_json(&path, &body).await?;
        Ok(result.into())
    }

    async fn teacher_quizzes(&self) -> Result<Vec<Quiz>, ApiError> {
        self.get_json::<Vec<QuizDto>>("/teacher/quizzes")
            .await?
            .into_iter()
            .map(QuizDto::into_quiz)
            .collect()
    }
}

#[async_trait]
impl EssayGateway for HttpBackend {
    async fn essay(&self, id: EssayId) -> Result<Essay, ApiError> {
        Ok(self
            .get_json::<EssayDto>(&format!("/essays/{id}"))
            .await?
            .into_essay())
    }

    async fn create_essay(&self, essay: &NewEssay) -> Result<Essay, ApiError> {
        let body = NewEssayBody::from(essay);
        Ok(self
            .post_json::<_, EssayDto>("/essays/", &body)
            .await?
            .into_essay())
    }

    async fn submit_essay(&self, submission: &EssaySubmission) -> Result<(), ApiError> {
        let path = format!("/essays/{}/submit", submission.essay_id);
        self.post_unit(&path, &ContentBody {
            content: &submission.content,
        })
        .await
    }

    async fn save_draft(&self, draft: &EssaySubmission) -> Result<(), ApiError> {
        let path = format!("/essays/{}/draft", draft.essay_id);
        self.post_unit(&path, &ContentBody {
            content: &draft.content,
        })
        .await
    }

    async fn teacher_essays(&self) -> Result<Vec<Essay>, ApiError> {
        Ok(self
            .get_json::<Vec<EssayDto>>("/teacher/essays")
            .await?
            .into_iter()
            .map(EssayDto::into_essay)
            .collect())
    }
}

#[async_trait]
impl DashboardGateway for HttpBackend {
    async fn student_dashboard(&self) -> Result<StudentDashboard, ApiError> {
        self.get_json::<StudentDashboardDto>("/student/dashboard")
            .await?
            .into_dashboard()
    }
}

#[async_trait]
impl AnalyticsGateway for HttpBackend {
    async fn quiz_analytics(&self, quiz_id: QuizId) -> Result<QuizAnalytics, ApiError> {
        let dto: QuizAnalyticsDto = self
            .get_json(&format!("/analytics/quiz/{quiz_id}"))
            .await?;
        Ok(dto.into())
    }

    async fn student_analytics(&self, student_id: UserId) -> Result<StudentAnalytics, ApiError> {
        let dto: StudentAnalyticsDto = self
            .get_json(&format!("/analytics/student/{student_id}"))
            .await?;
        Ok(dto.into())
    }
}
