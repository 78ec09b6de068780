use std::sync::Arc;

use api::{EssayGateway, QuizGateway};
use atheno_core::model::{Essay, EssayDraft, Quiz, QuizDraft};

use crate::error::AuthoringError;

/// Validates teacher drafts and publishes them.
#[derive(Clone)]
pub struct AuthoringService {
    quizzes: Arc<dyn QuizGateway>,
    essays: Arc<dyn EssayGateway>,
}

impl AuthoringService {
    #[must_use]
    pub fn new(quizzes: Arc<dyn QuizGateway>, essays: Arc<dyn EssayGateway>) -> Self {
        Self { quizzes, essays }
    }

    /// # Errors
    ///
    /// Returns `AuthoringError::Quiz` if the draft is incomplete, or
    /// `AuthoringError::Api` if the backend refuses it.
    pub async fn create_quiz(&self, draft: &QuizDraft) -> Result<Quiz, AuthoringError> {
        let quiz = draft.validate()?;
        let created = self
            .quizzes
            .create_quiz(&quiz)
            .await
            .inspect_err(|err| log::warn!("creating quiz {:?} failed: {err}", quiz.title))?;
        log::info!(
            "created quiz {} with {} questions",
            created.id(),
            created.question_count()
        );
        Ok(created)
    }

    /// # Errors
    ///
    /// Returns `AuthoringError::Essay` if the draft is incomplete, or
    /// `AuthoringError::Api` if the backend refuses it.
    pub async fn create_essay(&self, draft: &EssayDraft) -> Result<Essay, AuthoringError> {
        let essay = draft.validate()?;
        let created = self
            .essays
            .create_essay(&essay)
            .await
            .inspect_err(|err| log::warn!("creating essay {:?} failed: {err}", essay.title))?;
        log::info!("created essay {}", created.id());
        Ok(created)
    }
}
