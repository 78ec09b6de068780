use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::EssayId;

//
// ─── RUBRIC ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RubricCriterion {
    pub description: String,
    pub max_score: u32,
}

/// Grading criteria for an essay, scored server-side.
///
/// Older essays carry the rubric as one block of prose, so both shapes exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rubric {
    Criteria(BTreeMap<String, RubricCriterion>),
    Text(String),
}

impl Default for Rubric {
    fn default() -> Self {
        Self::Criteria(BTreeMap::new())
    }
}

impl Rubric {
    /// Sum of all criterion maxima; `None` for prose rubrics.
    #[must_use]
    pub fn total_max_score(&self) -> Option<u64> {
        match self {
            Rubric::Criteria(criteria) => Some(
                criteria
                    .values()
                    .map(|c| u64::from(c.max_score))
                    .sum(),
            ),
            Rubric::Text(_) => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Rubric::Criteria(criteria) => criteria.is_empty(),
            Rubric::Text(text) => text.trim().is_empty(),
        }
    }
}

//
// ─── ESSAY ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Essay {
    id: EssayId,
    title: String,
    prompt: String,
    rubric: Rubric,
    word_limit: Option<u32>,
    created_at: Option<DateTime<Utc>>,
}

impl Essay {
    /// A `word_limit` of zero means "no limit".
    #[must_use]
    pub fn new(
        id: EssayId,
        title: impl Into<String>,
        prompt: impl Into<String>,
        rubric: Rubric,
        word_limit: Option<u32>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            prompt: prompt.into(),
            rubric,
            word_limit: word_limit.filter(|limit| *limit > 0),
            created_at: None,
        }
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        self.created_at = created_at;
        self
    }

    #[must_use]
    pub fn id(&self) -> EssayId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    #[must_use]
    pub fn word_limit(&self) -> Option<u32> {
        self.word_limit
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

//
// ─── COMPOSITION ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EssayError {
    #[error("essay text is empty")]
    EmptySubmission,

    #[error("essay has {words} words, over the limit of {limit}")]
    OverWordLimit { words: usize, limit: u32 },
}

/// Number of whitespace-separated, non-empty tokens.
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordLimitStatus {
    Unlimited,
    Within,
    /// Above 90% of the limit but not over it.
    Near,
    Over,
}

#[must_use]
pub fn word_limit_status(words: usize, limit: Option<u32>) -> WordLimitStatus {
    let Some(limit) = limit else {
        return WordLimitStatus::Unlimited;
    };
    let limit = limit as usize;
    if words > limit {
        WordLimitStatus::Over
    } else if words * 10 > limit * 9 {
        WordLimitStatus::Near
    } else {
        WordLimitStatus::Within
    }
}

/// Body sent for both final submissions and drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssaySubmission {
    pub essay_id: EssayId,
    pub content: String,
}

/// The student's in-progress text for one essay prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssayComposition {
    essay: Essay,
    text: String,
}

impl EssayComposition {
    #[must_use]
    pub fn new(essay: Essay) -> Self {
        Self {
            essay,
            text: String::new(),
        }
    }

    #[must_use]
    pub fn essay(&self) -> &Essay {
        &self.essay
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        count_words(&self.text)
    }

    #[must_use]
    pub fn limit_status(&self) -> WordLimitStatus {
        word_limit_status(self.word_count(), self.essay.word_limit())
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Payload for a final submission.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::EmptySubmission` for blank text and
    /// `EssayError::OverWordLimit` when the word limit is exceeded.
    pub fn submission(&self) -> Result<EssaySubmission, EssayError> {
        if self.is_blank() {
            return Err(EssayError::EmptySubmission);
        }
        if let Some(limit) = self.essay.word_limit() {
            let words = self.word_count();
            if words > limit as usize {
                return Err(EssayError::OverWordLimit { words, limit });
            }
        }
        Ok(self.payload())
    }

    /// Payload for a draft save. Drafts ignore the word limit.
    ///
    /// # Errors
    ///
    /// Returns `EssayError::EmptySubmission` for blank text.
    pub fn draft(&self) -> Result<EssaySubmission, EssayError> {
        if self.is_blank() {
            return Err(EssayError::EmptySubmission);
        }
        Ok(self.payload())
    }

    fn payload(&self) -> EssaySubmission {
        EssaySubmission {
            essay_id: self.essay.id(),
            content: self.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn essay_with_limit(limit: Option<u32>) -> Essay {
        Essay::new(EssayId::new(1), "Rome", "Why did Rome fall?", Rubric::default(), limit)
    }

    #[test]
    fn counts_whitespace_delimited_tokens() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \t\n "), 0);
        assert_eq!(count_words("one"), 1);
        assert_eq!(count_words("  two   words "), 2);
        assert_eq!(count_words("line\nbreaks\tand  tabs"), 4);
    }

    #[test]
    fn limit_status_boundaries() {
        assert_eq!(word_limit_status(500, None), WordLimitStatus::Unlimited);
        assert_eq!(word_limit_status(90, Some(100)), WordLimitStatus::Within);
        assert_eq!(word_limit_status(91, Some(100)), WordLimitStatus::Near);
        assert_eq!(word_limit_status(100, Some(100)), WordLimitStatus::Near);
        assert_eq!(word_limit_status(101, Some(100)), WordLimitStatus::Over);
    }

    #[test]
    fn zero_word_limit_means_unlimited() {
        assert_eq!(essay_with_limit(Some(0)).word_limit(), None);
    }

    #[test]
    fn submit_allowed_at_exact_limit() {
        let mut composition = EssayComposition::new(essay_with_limit(Some(3)));
        composition.set_text("one two three");
        let submission = composition.submission().unwrap();
        assert_eq!(submission.content, "one two three");
        assert_eq!(submission.essay_id, EssayId::new(1));
    }

    #[test]
    fn submit_blocked_over_limit_but_draft_allowed() {
        let mut composition = EssayComposition::new(essay_with_limit(Some(3)));
        composition.set_text("one two three four");
        assert_eq!(
            composition.submission(),
            Err(EssayError::OverWordLimit { words: 4, limit: 3 })
        );
        assert!(composition.draft().is_ok());
    }

    #[test]
    fn blank_text_is_rejected_for_both_actions() {
        let mut composition = EssayComposition::new(essay_with_limit(None));
        composition.set_text("   ");
        assert_eq!(composition.submission(), Err(EssayError::EmptySubmission));
        assert_eq!(composition.draft(), Err(EssayError::EmptySubmission));
    }

    #[test]
    fn rubric_total_sums_criteria() {
        let mut criteria = BTreeMap::new();
        criteria.insert(
            "clarity".to_string(),
            RubricCriterion { description: String::new(), max_score: 10 },
        );
        criteria.insert(
            "content".to_string(),
            RubricCriterion { description: String::new(), max_score: 20 },
        );
        assert_eq!(Rubric::Criteria(criteria).total_max_score(), Some(30));
        assert_eq!(Rubric::Text("be clear".into()).total_max_score(), None);
    }

    #[test]
    fn rubric_total_does_not_overflow_on_large_backend_scores() {
        let mut criteria = BTreeMap::new();
        criteria.insert(
            "a".to_string(),
            RubricCriterion { description: String::new(), max_score: u32::MAX },
        );
        criteria.insert(
            "b".to_string(),
            RubricCriterion { description: String::new(), max_score: 1 },
        );
        assert_eq!(
            Rubric::Criteria(criteria).total_max_score(),
            Some(u64::from(u32::MAX) + 1)
        );
    }
}
