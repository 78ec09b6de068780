use std::collections::BTreeMap;

use crate::model::ids::QuestionId;

/// A student's answer to one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Index into the question's option list.
    Choice(usize),
    /// Free text for short-answer questions.
    Text(String),
}

/// Question id to answer, at most one answer per question.
///
/// Only `QuizAttempt` inserts entries, which keeps every key a question of the
/// quiz being attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap {
    entries: BTreeMap<QuestionId, Answer>,
}

impl AnswerMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, question_id: QuestionId, answer: Answer) {
        self.entries.insert(question_id, answer);
    }

    #[must_use]
    pub fn get(&self, question_id: QuestionId) -> Option<&Answer> {
        self.entries.get(&question_id)
    }

    #[must_use]
    pub fn contains(&self, question_id: QuestionId) -> bool {
        self.entries.contains_key(&question_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, &Answer)> {
        self.entries.iter().map(|(id, answer)| (*id, answer))
    }
}
