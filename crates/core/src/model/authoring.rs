use std::collections::BTreeMap;

use thiserror::Error;

use crate::model::answers::Answer;
use crate::model::essay::{Rubric, RubricCriterion};
use crate::model::ids::QuestionId;
use crate::model::quiz::Question;

//
// ─── QUIZ DRAFTS ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizDraftError {
    #[error("quiz title cannot be empty")]
    EmptyTitle,

    #[error("quiz needs at least one question")]
    NoQuestions,

    #[error("question {index} has no text")]
    EmptyQuestion { index: usize },

    #[error("question {index} needs at least two non-empty options")]
    TooFewOptions { index: usize },

    #[error("question {index} has no correct answer selected")]
    MissingCorrectAnswer { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionDraftKind {
    MultipleChoice {
        options: Vec<String>,
        correct: Option<usize>,
    },
    ShortAnswer {
        expected: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub kind: QuestionDraftKind,
}

impl QuestionDraft {
    /// Four empty options, no correct answer yet.
    #[must_use]
    pub fn blank_multiple_choice() -> Self {
        Self {
            text: String::new(),
            kind: QuestionDraftKind::MultipleChoice {
                options: vec![String::new(); 4],
                correct: None,
            },
        }
    }

    #[must_use]
    pub fn blank_short_answer() -> Self {
        Self {
            text: String::new(),
            kind: QuestionDraftKind::ShortAnswer {
                expected: String::new(),
            },
        }
    }

    fn validate(&self, index: usize) -> Result<Question, QuizDraftError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(QuizDraftError::EmptyQuestion { index });
        }
        let id = QuestionId::new(index as u64);

        match &self.kind {
            QuestionDraftKind::MultipleChoice { options, correct } => {
                // Blank options are dropped, so the correct index is re-mapped.
                let mut kept = Vec::with_capacity(options.len());
                let mut mapped_correct = None;
                for (position, option) in options.iter().enumerate() {
                    let label = option.trim();
                    if label.is_empty() {
                        continue;
                    }
                    if *correct == Some(position) {
                        mapped_correct = Some(kept.len());
                    }
                    kept.push(label.to_string());
                }
                if kept.len() < 2 {
                    return Err(QuizDraftError::TooFewOptions { index });
                }
                let correct =
                    mapped_correct.ok_or(QuizDraftError::MissingCorrectAnswer { index })?;
                Ok(Question::multiple_choice(id, text, kept).with_correct(Answer::Choice(correct)))
            }
            QuestionDraftKind::ShortAnswer { expected } => {
                let expected = expected.trim();
                if expected.is_empty() {
                    return Err(QuizDraftError::MissingCorrectAnswer { index });
                }
                Ok(Question::short_answer(id, text).with_correct(Answer::Text(expected.to_string())))
            }
        }
    }
}

/// Teacher-side form data for a new quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    pub questions: Vec<QuestionDraft>,
}

/// A validated quiz ready to be created by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuiz {
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<Question>,
}

impl QuizDraft {
    /// # Errors
    ///
    /// Returns the first `QuizDraftError` found, in question order.
    pub fn validate(&self) -> Result<NewQuiz, QuizDraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(QuizDraftError::EmptyTitle);
        }
        if self.questions.is_empty() {
            return Err(QuizDraftError::NoQuestions);
        }
        let questions = self
            .questions
            .iter()
            .enumerate()
            .map(|(index, draft)| draft.validate(index))
            .collect::<Result<Vec<_>, _>>()?;
        let description = Some(self.description.trim().to_string()).filter(|d| !d.is_empty());

        Ok(NewQuiz {
            title: title.to_string(),
            description,
            questions,
        })
    }
}

//
// ─── ESSAY DRAFTS ──────────────────────────────────────────────────────────────
//

/// Highest max score a single rubric criterion may carry.
pub const MAX_CRITERION_SCORE: u32 = 1_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EssayDraftError {
    #[error("essay title cannot be empty")]
    EmptyTitle,

    #[error("essay prompt cannot be empty")]
    EmptyPrompt,

    #[error("rubric needs at least one named criterion")]
    EmptyRubric,

    #[error("criterion {name:?} needs a max score between 1 and {}", MAX_CRITERION_SCORE)]
    InvalidMaxScore { name: String },

    #[error("criterion {name:?} is listed twice")]
    DuplicateCriterion { name: String },

    #[error("word limit must be greater than zero")]
    InvalidWordLimit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionDraft {
    pub name: String,
    pub description: String,
    pub max_score: u32,
}

impl CriterionDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, max_score: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            max_score,
        }
    }
}

/// Teacher-side form data for a new essay prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssayDraft {
    pub title: String,
    pub prompt: String,
    pub criteria: Vec<CriterionDraft>,
    pub word_limit: Option<u32>,
}

impl Default for EssayDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            prompt: String::new(),
            criteria: default_criteria(),
            word_limit: None,
        }
    }
}

/// The criteria a new essay form starts with.
#[must_use]
pub fn default_criteria() -> Vec<CriterionDraft> {
    vec![
        CriterionDraft::new("clarity", 10),
        CriterionDraft::new("structure", 10),
        CriterionDraft::new("content", 20),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEssay {
    pub title: String,
    pub prompt: String,
    pub rubric: Rubric,
    pub word_limit: Option<u32>,
}

impl EssayDraft {
    /// Criteria with a blank name are skipped rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `EssayDraftError` for missing title/prompt, an empty rubric,
    /// zero max scores, duplicate names, or a zero word limit.
    pub fn validate(&self) -> Result<NewEssay, EssayDraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(EssayDraftError::EmptyTitle);
        }
        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(EssayDraftError::EmptyPrompt);
        }
        if self.word_limit == Some(0) {
            return Err(EssayDraftError::InvalidWordLimit);
        }

        let mut criteria = BTreeMap::new();
        for draft in &self.criteria {
            let name = draft.name.trim();
            if name.is_empty() {
                continue;
            }
            if draft.max_score == 0 || draft.max_score > MAX_CRITERION_SCORE {
                return Err(EssayDraftError::InvalidMaxScore {
                    name: name.to_string(),
                });
            }
            let criterion = RubricCriterion {
                description: draft.description.trim().to_string(),
                max_score: draft.max_score,
            };
            if criteria.insert(name.to_string(), criterion).is_some() {
                return Err(EssayDraftError::DuplicateCriterion {
                    name: name.to_string(),
                });
            }
        }
        if criteria.is_empty() {
            return Err(EssayDraftError::EmptyRubric);
        }

        Ok(NewEssay {
            title: title.to_string(),
            prompt: prompt.to_string(),
            rubric: Rubric::Criteria(criteria),
            word_limit: self.word_limit,
        })
    }
}
