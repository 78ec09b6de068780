use atheno_core::model::{Essay, EssayComposition, EssayError, Rubric, WordLimitStatus};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RubricRowVm {
    pub name: String,
    pub description: String,
    pub max_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RubricVm {
    Rows {
        rows: Vec<RubricRowVm>,
        total_label: String,
    },
    Text(String),
}

impl From<&Rubric> for RubricVm {
    fn from(rubric: &Rubric) -> Self {
        match rubric {
            Rubric::Criteria(criteria) => Self::Rows {
                rows: criteria
                    .iter()
                    .map(|(name, criterion)| RubricRowVm {
                        name: name.clone(),
                        description: criterion.description.clone(),
                        max_label: format!("{} pts", criterion.max_score),
                    })
                    .collect(),
                total_label: format!("{} pts", rubric.total_max_score().unwrap_or(0)),
            },
            Rubric::Text(text) => Self::Text(text.clone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EssaySaveState {
    Idle,
    SavingDraft,
    DraftSaved,
    Submitting,
    Submitted,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EssayVm {
    composition: EssayComposition,
    save_state: EssaySaveState,
    drafts_saved: u64,
}

impl EssayVm {
    #[must_use]
    pub fn new(essay: Essay) -> Self {
        Self::from_composition(EssayComposition::new(essay))
    }

    #[must_use]
    pub fn from_composition(composition: EssayComposition) -> Self {
        Self {
            composition,
            save_state: EssaySaveState::Idle,
            drafts_saved: 0,
        }
    }

    #[must_use]
    pub fn composition(&self) -> &EssayComposition {
        &self.composition
    }

    #[must_use]
    pub fn essay(&self) -> &Essay {
        self.composition.essay()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.composition.text()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.composition.set_text(text);
        if matches!(
            self.save_state,
            EssaySaveState::DraftSaved | EssaySaveState::Failed(_)
        ) {
            self.save_state = EssaySaveState::Idle;
        }
    }

    #[must_use]
    pub fn save_state(&self) -> &EssaySaveState {
        &self.save_state
    }

    pub fn set_save_state(&mut self, state: EssaySaveState) {
        self.save_state = state;
    }

    /// Shows the saved marker and returns a ticket for clearing it later.
    pub fn mark_draft_saved(&mut self) -> u64 {
        self.drafts_saved = self.drafts_saved.wrapping_add(1);
        self.save_state = EssaySaveState::DraftSaved;
        self.drafts_saved
    }

    /// Hides the saved marker unless a later save has replaced `ticket`.
    pub fn clear_draft_notice(&mut self, ticket: u64) {
        if self.save_state == EssaySaveState::DraftSaved && self.drafts_saved == ticket {
            self.save_state = EssaySaveState::Idle;
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(
            self.save_state,
            EssaySaveState::SavingDraft | EssaySaveState::Submitting
        )
    }

    #[must_use]
    pub fn word_count_label(&self) -> String {
        let words = self.composition.word_count();
        match self.essay().word_limit() {
            Some(limit) => format!("{words} / {limit} words"),
            None => format!("{words} words"),
        }
    }

    #[must_use]
    pub fn word_count_class(&self) -> &'static str {
        match self.composition.limit_status() {
            WordLimitStatus::Unlimited | WordLimitStatus::Within => "word-count",
            WordLimitStatus::Near => "word-count word-count--near",
            WordLimitStatus::Over => "word-count word-count--over",
        }
    }

    /// Inline warning under the editor; `None` while within the limit.
    #[must_use]
    pub fn limit_warning(&self) -> Option<String> {
        if self.composition.limit_status() != WordLimitStatus::Over {
            return None;
        }
        let limit = self.essay().word_limit()?;
        Some(format!(
            "Your essay is over the {limit}-word limit. Trim it before submitting."
        ))
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && self.composition.submission().is_ok()
    }

    #[must_use]
    pub fn can_save_draft(&self) -> bool {
        !self.is_busy() && !self.composition.is_blank()
    }

    #[must_use]
    pub fn rubric(&self) -> RubricVm {
        RubricVm::from(self.essay().rubric())
    }
}

/// Message for a blocked submission, worded for the student.
#[must_use]
pub fn essay_error_message(err: &EssayError) -> String {
    match err {
        EssayError::EmptySubmission => "Write something before submitting.".to_string(),
        EssayError::OverWordLimit { words, limit } => {
            format!("Your essay has {words} words; the limit is {limit}.")
        }
        _ => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use atheno_core::model::{EssayId, RubricCriterion};

    fn essay(limit: Option<u32>) -> Essay {
        let mut criteria = BTreeMap::new();
        criteria.insert(
            "clarity".to_string(),
            RubricCriterion {
                description: "Easy to follow".into(),
                max_score: 10,
            },
        );
        criteria.insert(
            "content".to_string(),
            RubricCriterion {
                description: String::new(),
                max_score: 20,
            },
        );
        Essay::new(
            EssayId::new(4),
            "Rome",
            "Why did Rome fall?",
            Rubric::Criteria(criteria),
            limit,
        )
    }

    #[test]
    fn word_count_updates_with_text() {
        let mut vm = EssayVm::new(essay(Some(10)));
        assert_eq!(vm.word_count_label(), "0 / 10 words");
        assert!(!vm.can_submit());
        assert!(!vm.can_save_draft());

        vm.set_text("  Rome   fell slowly ");
        assert_eq!(vm.word_count_label(), "3 / 10 words");
        assert_eq!(vm.word_count_class(), "word-count");
        assert!(vm.can_submit());
    }

    #[test]
    fn over_limit_blocks_submit_but_not_draft() {
        let mut vm = EssayVm::new(essay(Some(3)));
        vm.set_text("one two three four");
        assert_eq!(vm.word_count_class(), "word-count word-count--over");
        assert!(vm.limit_warning().unwrap().contains("3-word limit"));
        assert!(!vm.can_submit());
        assert!(vm.can_save_draft());

        vm.set_text("one two three");
        assert!(vm.limit_warning().is_none());
        assert!(vm.can_submit());
    }

    #[test]
    fn unlimited_essays_never_warn() {
        let mut vm = EssayVm::new(essay(None));
        vm.set_text("word ".repeat(5000));
        assert_eq!(vm.word_count_label(), "5000 words");
        assert!(vm.limit_warning().is_none());
        assert!(vm.can_submit());
    }

    #[test]
    fn editing_clears_saved_marker_but_not_busy_state() {
        let mut vm = EssayVm::new(essay(None));
        vm.set_save_state(EssaySaveState::DraftSaved);
        vm.set_text("more");
        assert_eq!(vm.save_state(), &EssaySaveState::Idle);

        vm.set_save_state(EssaySaveState::Submitting);
        vm.set_text("more text");
        assert!(vm.is_busy());
        assert!(!vm.can_submit());
    }

    #[test]
    fn earlier_save_timer_leaves_newer_marker_alone() {
        let mut vm = EssayVm::new(essay(None));
        vm.set_text("first");
        let first = vm.mark_draft_saved();
        vm.set_text("first and second");
        let second = vm.mark_draft_saved();

        vm.clear_draft_notice(first);
        assert_eq!(vm.save_state(), &EssaySaveState::DraftSaved);

        vm.clear_draft_notice(second);
        assert_eq!(vm.save_state(), &EssaySaveState::Idle);
    }

    #[test]
    fn draft_notice_ticket_ignores_other_states() {
        let mut vm = EssayVm::new(essay(None));
        let ticket = vm.mark_draft_saved();
        vm.set_save_state(EssaySaveState::Submitting);
        vm.clear_draft_notice(ticket);
        assert_eq!(vm.save_state(), &EssaySaveState::Submitting);
    }

    #[test]
    fn rubric_rows_sum_points() {
        let vm = EssayVm::new(essay(None));
        let RubricVm::Rows { rows, total_label } = vm.rubric() else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "clarity");
        assert_eq!(rows[1].max_label, "20 pts");
        assert_eq!(total_label, "30 pts");
    }

    #[test]
    fn blocked_submit_messages() {
        assert_eq!(
            essay_error_message(&EssayError::OverWordLimit { words: 12, limit: 10 }),
            "Your essay has 12 words; the limit is 10."
        );
    }
}
