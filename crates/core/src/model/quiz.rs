use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::answers::Answer;
use crate::model::ids::{QuestionId, QuizId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question id {0} appears more than once")]
    DuplicateQuestionId(QuestionId),
}

/// How a question is answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    MultipleChoice { options: Vec<String> },
    ShortAnswer,
}

/// A single quiz question as seen by students and teachers.
///
/// `correct` is only populated on teacher-facing payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    kind: QuestionKind,
    correct: Option<Answer>,
}

impl Question {
    #[must_use]
    pub fn multiple_choice(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            kind: QuestionKind::MultipleChoice { options },
            correct: None,
        }
    }

    #[must_use]
    pub fn short_answer(id: QuestionId, prompt: impl Into<String>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            kind: QuestionKind::ShortAnswer,
            correct: None,
        }
    }

    #[must_use]
    pub fn with_correct(mut self, correct: Answer) -> Self {
        self.correct = Some(correct);
        self
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Option labels; empty for short-answer questions.
    #[must_use]
    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::MultipleChoice { options } => options,
            QuestionKind::ShortAnswer => &[],
        }
    }

    #[must_use]
    pub fn is_multiple_choice(&self) -> bool {
        matches!(self.kind, QuestionKind::MultipleChoice { .. })
    }

    #[must_use]
    pub fn correct(&self) -> Option<&Answer> {
        self.correct.as_ref()
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<usize> {
        match self.correct {
            Some(Answer::Choice(index)) => Some(index),
            _ => None,
        }
    }

    /// The answer recorded when a student never touched this question.
    #[must_use]
    pub fn default_answer(&self) -> Answer {
        match self.kind {
            QuestionKind::MultipleChoice { .. } => Answer::Choice(0),
            QuestionKind::ShortAnswer => Answer::Text(String::new()),
        }
    }
}

/// A quiz with its ordered questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: QuizId,
    title: String,
    description: Option<String>,
    questions: Vec<Question>,
    created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    /// Build a quiz from backend data.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::DuplicateQuestionId` if two questions share an id.
    pub fn new(
        id: QuizId,
        title: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, QuizError> {
        for (index, question) in questions.iter().enumerate() {
            if questions[..index].iter().any(|q| q.id == question.id) {
                return Err(QuizError::DuplicateQuestionId(question.id));
            }
        }
        Ok(Self {
            id,
            title: title.into(),
            description: None,
            questions,
            created_at: None,
        })
    }

    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        self.created_at = created_at;
        self
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Copy with every correct answer removed, as students receive it.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for question in &mut copy.questions {
            question.correct = None;
        }
        copy
    }
}
