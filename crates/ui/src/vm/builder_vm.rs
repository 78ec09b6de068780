use atheno_core::model::{
    CriterionDraft, EssayDraft, EssayDraftError, MAX_CRITERION_SCORE, QuestionDraft,
    QuestionDraftKind, QuizDraft, QuizDraftError, default_criteria,
};
use services::AuthoringError;

const MIN_OPTIONS: usize = 2;

//
// ─── QUIZ BUILDER ──────────────────────────────────────────────────────────────
//

/// Form state for the create-quiz page. Question and option indexes are positions
/// in the form; out-of-range edits are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizBuilderVm {
    draft: QuizDraft,
}

impl Default for QuizBuilderVm {
    fn default() -> Self {
        Self {
            draft: QuizDraft {
                questions: vec![QuestionDraft::blank_multiple_choice()],
                ..QuizDraft::default()
            },
        }
    }
}

impl QuizBuilderVm {
    #[must_use]
    pub fn draft(&self) -> &QuizDraft {
        &self.draft
    }

    pub fn set_title(&mut self, title: String) {
        self.draft.title = title;
    }

    pub fn set_description(&mut self, description: String) {
        self.draft.description = description;
    }

    pub fn add_multiple_choice(&mut self) {
        self.draft.questions.push(QuestionDraft::blank_multiple_choice());
    }

    pub fn add_short_answer(&mut self) {
        self.draft.questions.push(QuestionDraft::blank_short_answer());
    }

    /// The form always keeps one question.
    pub fn remove_question(&mut self, index: usize) {
        if self.draft.questions.len() > 1 && index < self.draft.questions.len() {
            self.draft.questions.remove(index);
        }
    }

    pub fn set_question_text(&mut self, index: usize, text: String) {
        if let Some(question) = self.draft.questions.get_mut(index) {
            question.text = text;
        }
    }

    pub fn set_option(&mut self, index: usize, option: usize, label: String) {
        if let Some(slot) = self
            .choices_mut(index)
            .and_then(|(options, _)| options.get_mut(option))
        {
            *slot = label;
        }
    }

    pub fn add_option(&mut self, index: usize) {
        if let Some((options, _)) = self.choices_mut(index) {
            options.push(String::new());
        }
    }

    /// Keeps at least two options; the correct mark follows its option.
    pub fn remove_option(&mut self, index: usize, option: usize) {
        let Some((options, correct)) = self.choices_mut(index) else {
            return;
        };
        if options.len() <= MIN_OPTIONS || option >= options.len() {
            return;
        }
        options.remove(option);
        *correct = match *correct {
            Some(current) if current == option => None,
            Some(current) if current > option => Some(current - 1),
            other => other,
        };
    }

    pub fn set_correct(&mut self, index: usize, option: usize) {
        if let Some((options, correct)) = self.choices_mut(index) {
            if option < options.len() {
                *correct = Some(option);
            }
        }
    }

    pub fn set_expected(&mut self, index: usize, text: String) {
        if let Some(QuestionDraft {
            kind: QuestionDraftKind::ShortAnswer { expected },
            ..
        }) = self.draft.questions.get_mut(index)
        {
            *expected = text;
        }
    }

    /// Back to an empty form after a successful publish.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn choices_mut(&mut self, index: usize) -> Option<(&mut Vec<String>, &mut Option<usize>)> {
        match self.draft.questions.get_mut(index) {
            Some(QuestionDraft {
                kind: QuestionDraftKind::MultipleChoice { options, correct },
                ..
            }) => Some((options, correct)),
            _ => None,
        }
    }
}

//
// ─── ESSAY BUILDER ─────────────────────────────────────────────────────────────
//

/// One rubric row as typed; the max score stays text until the form is sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CriterionInput {
    pub name: String,
    pub description: String,
    pub max_score: String,
}

impl From<CriterionDraft> for CriterionInput {
    fn from(draft: CriterionDraft) -> Self {
        Self {
            name: draft.name,
            description: draft.description,
            max_score: draft.max_score.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EssayBuilderVm {
    title: String,
    prompt: String,
    criteria: Vec<CriterionInput>,
    word_limit: String,
}

impl Default for EssayBuilderVm {
    fn default() -> Self {
        Self {
            title: String::new(),
            prompt: String::new(),
            criteria: default_criteria().into_iter().map(CriterionInput::from).collect(),
            word_limit: String::new(),
        }
    }
}

impl EssayBuilderVm {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn criteria(&self) -> &[CriterionInput] {
        &self.criteria
    }

    #[must_use]
    pub fn word_limit(&self) -> &str {
        &self.word_limit
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub fn set_prompt(&mut self, prompt: String) {
        self.prompt = prompt;
    }

    pub fn set_word_limit(&mut self, word_limit: String) {
        self.word_limit = word_limit;
    }

    pub fn add_criterion(&mut self) {
        self.criteria.push(CriterionInput {
            name: String::new(),
            description: String::new(),
            max_score: "10".to_string(),
        });
    }

    /// Removing the last remaining criterion is a no-op.
    pub fn remove_criterion(&mut self, index: usize) {
        if self.criteria.len() > 1 && index < self.criteria.len() {
            self.criteria.remove(index);
        }
    }

    pub fn set_criterion_name(&mut self, index: usize, name: String) {
        if let Some(criterion) = self.criteria.get_mut(index) {
            criterion.name = name;
        }
    }

    pub fn set_criterion_description(&mut self, index: usize, description: String) {
        if let Some(criterion) = self.criteria.get_mut(index) {
            criterion.description = description;
        }
    }

    pub fn set_criterion_max_score(&mut self, index: usize, max_score: String) {
        if let Some(criterion) = self.criteria.get_mut(index) {
            criterion.max_score = max_score;
        }
    }

    /// Sum of the parseable max scores, for the live total under the rubric.
    #[must_use]
    pub fn total_points(&self) -> u64 {
        self.criteria
            .iter()
            .filter(|criterion| !criterion.name.trim().is_empty())
            .filter_map(|criterion| criterion.max_score.trim().parse::<u32>().ok())
            .map(u64::from)
            .sum()
    }

    /// Unparseable numbers become zero so the draft's own validation names them.
    #[must_use]
    pub fn draft(&self) -> EssayDraft {
        let word_limit = match self.word_limit.trim() {
            "" => None,
            raw => Some(raw.parse::<u32>().unwrap_or(0)),
        };
        EssayDraft {
            title: self.title.clone(),
            prompt: self.prompt.clone(),
            criteria: self
                .criteria
                .iter()
                .map(|input| CriterionDraft {
                    name: input.name.clone(),
                    description: input.description.clone(),
                    max_score: input.max_score.trim().parse::<u32>().unwrap_or(0),
                })
                .collect(),
            word_limit,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

//
// ─── MESSAGES ──────────────────────────────────────────────────────────────────
//

#[must_use]
pub fn quiz_draft_message(err: &QuizDraftError) -> String {
    match err {
        QuizDraftError::EmptyTitle => "Give the quiz a title.".to_string(),
        QuizDraftError::NoQuestions => "Add at least one question.".to_string(),
        QuizDraftError::EmptyQuestion { index } => {
            format!("Question {} needs text.", index + 1)
        }
        QuizDraftError::TooFewOptions { index } => {
            format!("Question {} needs at least two options.", index + 1)
        }
        QuizDraftError::MissingCorrectAnswer { index } => {
            format!("Question {} needs a correct answer.", index + 1)
        }
        _ => err.to_string(),
    }
}

#[must_use]
pub fn essay_draft_message(err: &EssayDraftError) -> String {
    match err {
        EssayDraftError::EmptyTitle => "Give the essay a title.".to_string(),
        EssayDraftError::EmptyPrompt => "Write a prompt for students.".to_string(),
        EssayDraftError::EmptyRubric => "Name at least one rubric criterion.".to_string(),
        EssayDraftError::InvalidMaxScore { name } => {
            format!("Criterion \"{name}\" needs a max score from 1 to {MAX_CRITERION_SCORE}.")
        }
        EssayDraftError::DuplicateCriterion { name } => {
            format!("Criterion \"{name}\" is listed twice.")
        }
        EssayDraftError::InvalidWordLimit => {
            "Word limit must be a positive whole number.".to_string()
        }
        _ => err.to_string(),
    }
}

#[must_use]
pub fn authoring_error_message(err: &AuthoringError) -> String {
    match err {
        AuthoringError::Quiz(err) => quiz_draft_message(err),
        AuthoringError::Essay(err) => essay_draft_message(err),
        _ => "Failed to publish. Please try again.".to_string(),
    }
}
