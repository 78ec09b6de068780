use std::sync::Arc;

use api::QuizGateway;
use atheno_core::model::{QuizAttempt, QuizId, QuizResult};

use crate::error::QuizServiceError;

/// Loads quizzes for students and submits their answers.
#[derive(Clone)]
pub struct QuizTakingService {
    quizzes: Arc<dyn QuizGateway>,
}

impl QuizTakingService {
    #[must_use]
    pub fn new(quizzes: Arc<dyn QuizGateway>) -> Self {
        Self { quizzes }
    }

    /// Fetch a quiz and open an attempt at its first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Api` if the fetch fails, or
    /// `QuizServiceError::Attempt` when the quiz has no questions.
    pub async fn start(&self, quiz_id: QuizId) -> Result<QuizAttempt, QuizServiceError> {
        let quiz = self.quizzes.quiz(quiz_id).await.inspect_err(|err| {
            log::warn!("failed to load quiz {quiz_id}: {err}");
        })?;
        let attempt = QuizAttempt::start(quiz)?;
        log::debug!(
            "started quiz {quiz_id} with {} questions",
            attempt.question_count()
        );
        Ok(attempt)
    }

    /// Submit the complete answer set; unanswered questions use their defaults.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Api` if the backend rejects the submission.
    pub async fn submit(&self, attempt: &QuizAttempt) -> Result<QuizResult, QuizServiceError> {
        let submission = attempt.submission();
        let quiz_id = submission.quiz_id();
        let result = self
            .quizzes
            .submit_quiz(&submission)
            .await
            .inspect_err(|err| log::warn!("quiz {quiz_id} submission failed: {err}"))?;
        log::info!(
            "quiz {quiz_id} submitted ({}/{} answered), score {}%",
            attempt.answered_count(),
            attempt.question_count(),
            result.score_percent
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use api::ApiError;
    use async_trait::async_trait;
    use atheno_core::model::{
        AttemptError, NewQuiz, Question, QuestionId, Quiz, QuizSubmission,
    };

    /// Serves one fixed quiz and records what gets submitted.
    struct FakeQuizzes {
        quiz: Quiz,
        submitted: Mutex<Vec<QuizSubmission>>,
        fail_submit: bool,
    }

    #[async_trait]
    impl QuizGateway for FakeQuizzes {
        async fn quiz(&self, id: QuizId) -> Result<Quiz, ApiError> {
            if id == self.quiz.id() {
                Ok(self.quiz.clone())
            } else {
                Err(ApiError::NotFound)
            }
        }

        async fn create_quiz(&self, _quiz: &NewQuiz) -> Result<Quiz, ApiError> {
            Err(ApiError::Status(405))
        }

        async fn submit_quiz(&self, submission: &QuizSubmission) -> Result<QuizResult, ApiError> {
            if self.fail_submit {
                return Err(ApiError::Status(500));
            }
            self.submitted.lock().unwrap().push(submission.clone());
            Ok(QuizResult { score_percent: 75 })
        }

        async fn teacher_quizzes(&self) -> Result<Vec<Quiz>, ApiError> {
            Ok(vec![self.quiz.clone()])
        }
    }

    fn fake(questions: usize, fail_submit: bool) -> Arc<FakeQuizzes> {
        let questions = (0..questions)
            .map(|i| {
                Question::multiple_choice(
                    QuestionId::new(i as u64),
                    format!("Q{}", i + 1),
                    vec!["a".into(), "b".into(), "c".into()],
                )
            })
            .collect();
        Arc::new(FakeQuizzes {
            quiz: Quiz::new(QuizId::new(9), "Quiz", questions).unwrap(),
            submitted: Mutex::new(Vec::new()),
            fail_submit,
        })
    }

    #[tokio::test]
    async fn empty_quiz_is_refused() {
        let service = QuizTakingService::new(fake(0, false));
        let err = service.start(QuizId::new(9)).await.unwrap_err();
        assert!(matches!(err, QuizServiceError::Attempt(AttemptError::EmptyQuiz)));
    }

    #[tokio::test]
    async fn unknown_quiz_surfaces_not_found() {
        let service = QuizTakingService::new(fake(3, false));
        let err = service.start(QuizId::new(1)).await.unwrap_err();
        assert!(matches!(err, QuizServiceError::Api(ApiError::NotFound)));
    }

    #[tokio::test]
    async fn submit_sends_every_question() {
        let gateway = fake(3, false);
        let service = QuizTakingService::new(gateway.clone());
        let mut attempt = service.start(QuizId::new(9)).await.unwrap();
        attempt.select_option(QuestionId::new(0), 2).unwrap();
        attempt.select_option(QuestionId::new(2), 1).unwrap();

        let result = service.submit(&attempt).await.unwrap();
        assert_eq!(result.score_percent, 75);

        let submitted = gateway.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].answers().len(), 3);
    }

    #[tokio::test]
    async fn failed_submit_keeps_attempt_usable() {
        let service = QuizTakingService::new(fake(2, true));
        let mut attempt = service.start(QuizId::new(9)).await.unwrap();
        attempt.select_option(QuestionId::new(1), 1).unwrap();

        let err = service.submit(&attempt).await.unwrap_err();
        assert!(matches!(err, QuizServiceError::Api(ApiError::Status(500))));
        assert!(!err.is_auth());
        assert_eq!(attempt.answered_count(), 1);
    }
}
