use thiserror::Error;

use crate::model::answers::{Answer, AnswerMap};
use crate::model::ids::{QuestionId, QuizId};
use crate::model::quiz::{Question, QuestionKind, Quiz};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("quiz has no questions")]
    EmptyQuiz,

    #[error("question {0} is not part of this quiz")]
    UnknownQuestion(QuestionId),

    #[error("option {index} is out of range for question {question} ({options} options)")]
    OptionOutOfRange {
        question: QuestionId,
        index: usize,
        options: usize,
    },

    #[error("answer kind does not match question {0}")]
    AnswerKindMismatch(QuestionId),
}

/// One student's pass through a quiz: cursor plus answers so far.
///
/// The cursor always points at a question (`0..question_count`), and the
/// answer map only ever holds ids of this quiz's questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAttempt {
    quiz: Quiz,
    cursor: usize,
    answers: AnswerMap,
}

impl QuizAttempt {
    /// Begin an attempt with an empty answer map at the first question.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::EmptyQuiz` when the quiz has no questions.
    pub fn start(quiz: Quiz) -> Result<Self, AttemptError> {
        if quiz.question_count() == 0 {
            return Err(AttemptError::EmptyQuiz);
        }
        Ok(Self {
            quiz,
            cursor: 0,
            answers: AnswerMap::new(),
        })
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.quiz.question_count()
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.quiz.questions()[self.cursor]
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.cursor + 1 == self.question_count()
    }

    /// Record or overwrite the answer for a question.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError` if the question is not in the quiz, a choice index
    /// is out of range, or the answer kind does not fit the question.
    pub fn select_answer(
        &mut self,
        question_id: QuestionId,
        answer: Answer,
    ) -> Result<(), AttemptError> {
        let question = self
            .quiz
            .question(question_id)
            .ok_or(AttemptError::UnknownQuestion(question_id))?;

        match (question.kind(), &answer) {
            (QuestionKind::MultipleChoice { options }, Answer::Choice(index)) => {
                if *index >= options.len() {
                    return Err(AttemptError::OptionOutOfRange {
                        question: question_id,
                        index: *index,
                        options: options.len(),
                    });
                }
            }
            (QuestionKind::ShortAnswer, Answer::Text(_)) => {}
            _ => return Err(AttemptError::AnswerKindMismatch(question_id)),
        }

        self.answers.insert(question_id, answer);
        Ok(())
    }

    /// Shorthand for choosing an option of a multiple-choice question.
    ///
    /// # Errors
    ///
    /// Same as [`QuizAttempt::select_answer`].
    pub fn select_option(
        &mut self,
        question_id: QuestionId,
        option_index: usize,
    ) -> Result<(), AttemptError> {
        self.select_answer(question_id, Answer::Choice(option_index))
    }

    /// Advance the cursor. Returns `false` (and does nothing) on the last question.
    pub fn go_next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Step back. Returns `false` (and does nothing) on the first question.
    pub fn go_previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    #[must_use]
    pub fn answer_for(&self, question_id: QuestionId) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Position-based progress, `(cursor + 1) / N` as a whole percentage.
    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        let done = u32::try_from(self.cursor + 1).unwrap_or(u32::MAX);
        let total = u32::try_from(self.question_count()).unwrap_or(u32::MAX);
        done.saturating_mul(100) / total.max(1)
    }

    /// The payload sent on submit: one entry per question, unanswered ones defaulted.
    #[must_use]
    pub fn submission(&self) -> QuizSubmission {
        let mut answers = AnswerMap::new();
        for question in self.quiz.questions() {
            let answer = self
                .answers
                .get(question.id())
                .cloned()
                .unwrap_or_else(|| question.default_answer());
            answers.insert(question.id(), answer);
        }
        QuizSubmission {
            quiz_id: self.quiz.id(),
            answers,
        }
    }
}

/// Complete answer set for one quiz, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSubmission {
    quiz_id: QuizId,
    answers: AnswerMap,
}

impl QuizSubmission {
    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }
}

/// Score returned by the backend after grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub score_percent: u32,
}
