use atheno_core::model::{Answer, QuestionKind, QuizAttempt, QuizResult};

use crate::views::ViewError;

const SUBMIT_FAILED: &str = "Failed to submit quiz. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Next,
    Previous,
    Choose(usize),
    Write(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizFlowPhase {
    Idle,
    Loading,
    Ready,
    Submitting,
    Done { score_percent: u32 },
    Error(ViewError),
}

/// Blocking message shown over the quiz. `leave` sends the student back to
/// their dashboard once it is dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizAlert {
    pub message: String,
    pub leave: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizOptionVm {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub number_label: String,
    pub prompt: String,
    pub options: Vec<QuizOptionVm>,
    /// `Some` for short-answer questions.
    pub text_answer: Option<String>,
    pub is_first: bool,
    pub is_last: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizFlowVm {
    phase: QuizFlowPhase,
    attempt: Option<QuizAttempt>,
    alert: Option<QuizAlert>,
}

impl Default for QuizFlowVm {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizFlowVm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: QuizFlowPhase::Idle,
            attempt: None,
            alert: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> QuizFlowPhase {
        self.phase
    }

    #[must_use]
    pub fn alert(&self) -> Option<&QuizAlert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) -> Option<QuizAlert> {
        self.alert.take()
    }

    pub fn begin_loading(&mut self) {
        self.phase = QuizFlowPhase::Loading;
        self.attempt = None;
        self.alert = None;
    }

    pub fn finish_loading(&mut self, loaded: Result<QuizAttempt, ViewError>) {
        match loaded {
            Ok(attempt) => {
                self.attempt = Some(attempt);
                self.phase = QuizFlowPhase::Ready;
            }
            Err(err) => {
                self.phase = QuizFlowPhase::Error(err);
                self.alert = Some(QuizAlert {
                    message: err.message().to_string(),
                    leave: true,
                });
            }
        }
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.attempt.as_ref().map(|attempt| attempt.quiz().title())
    }

    /// Apply a navigation or answer intent. Returns whether anything changed.
    pub fn apply(&mut self, intent: QuizIntent) -> bool {
        if self.phase != QuizFlowPhase::Ready {
            return false;
        }
        let Some(attempt) = self.attempt.as_mut() else {
            return false;
        };
        let question_id = attempt.current_question().id();
        let selected = match intent {
            QuizIntent::Next => return attempt.go_next(),
            QuizIntent::Previous => return attempt.go_previous(),
            QuizIntent::Choose(index) => attempt.select_option(question_id, index),
            QuizIntent::Write(text) => attempt.select_answer(question_id, Answer::Text(text)),
        };
        match selected {
            Ok(()) => true,
            Err(err) => {
                log::warn!("ignored answer: {err}");
                false
            }
        }
    }

    #[must_use]
    pub fn question(&self) -> Option<QuestionVm> {
        let attempt = self.attempt.as_ref()?;
        let question = attempt.current_question();
        let answer = attempt.answer_for(question.id());

        let (options, text_answer) = match question.kind() {
            QuestionKind::MultipleChoice { options } => {
                let options = options
                    .iter()
                    .enumerate()
                    .map(|(index, label)| QuizOptionVm {
                        index,
                        label: label.clone(),
                        selected: answer == Some(&Answer::Choice(index)),
                    })
                    .collect();
                (options, None)
            }
            QuestionKind::ShortAnswer => {
                let text = match answer {
                    Some(Answer::Text(text)) => text.clone(),
                    _ => String::new(),
                };
                (Vec::new(), Some(text))
            }
        };

        Some(QuestionVm {
            number_label: format!(
                "Question {} of {}",
                attempt.current_index() + 1,
                attempt.question_count()
            ),
            prompt: question.prompt().to_string(),
            options,
            text_answer,
            is_first: attempt.is_first(),
            is_last: attempt.is_last(),
        })
    }

    #[must_use]
    pub fn progress_percent(&self) -> u32 {
        self.attempt
            .as_ref()
            .map_or(0, QuizAttempt::progress_percent)
    }

    #[must_use]
    pub fn answered_label(&self) -> String {
        self.attempt.as_ref().map_or_else(String::new, |attempt| {
            format!(
                "{} of {} answered",
                attempt.answered_count(),
                attempt.question_count()
            )
        })
    }

    /// Move to `Submitting` and hand out the attempt to send. `None` unless ready.
    pub fn begin_submit(&mut self) -> Option<QuizAttempt> {
        if self.phase != QuizFlowPhase::Ready {
            return None;
        }
        let attempt = self.attempt.clone()?;
        self.phase = QuizFlowPhase::Submitting;
        Some(attempt)
    }

    /// A failed submit returns to `Ready` with every answer kept.
    pub fn finish_submit(&mut self, result: Result<QuizResult, ViewError>) {
        match result {
            Ok(result) => {
                self.phase = QuizFlowPhase::Done {
                    score_percent: result.score_percent,
                };
            }
            Err(err) => {
                self.phase = QuizFlowPhase::Ready;
                let message = if err == ViewError::Unauthenticated {
                    err.message()
                } else {
                    SUBMIT_FAILED
                };
                self.alert = Some(QuizAlert {
                    message: message.to_string(),
                    leave: false,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atheno_core::model::{Question, QuestionId, Quiz, QuizId};

    fn ready_vm() -> QuizFlowVm {
        let quiz = Quiz::new(
            QuizId::new(1),
            "Capitals",
            vec![
                Question::multiple_choice(
                    QuestionId::new(0),
                    "France?",
                    vec!["Paris".into(), "Lyon".into()],
                ),
                Question::short_answer(QuestionId::new(1), "Spain?"),
                Question::multiple_choice(
                    QuestionId::new(2),
                    "Italy?",
                    vec!["Milan".into(), "Rome".into()],
                ),
            ],
        )
        .unwrap();
        let mut vm = QuizFlowVm::new();
        vm.begin_loading();
        vm.finish_loading(Ok(QuizAttempt::start(quiz).unwrap()));
        vm
    }

    #[test]
    fn loading_moves_to_ready_on_first_question() {
        let vm = ready_vm();
        assert_eq!(vm.phase(), QuizFlowPhase::Ready);
        let question = vm.question().unwrap();
        assert_eq!(question.number_label, "Question 1 of 3");
        assert!(question.is_first);
        assert!(question.options.iter().all(|option| !option.selected));
        assert_eq!(vm.progress_percent(), 33);
    }

    #[test]
    fn navigation_is_clamped() {
        let mut vm = ready_vm();
        assert!(!vm.apply(QuizIntent::Previous));
        assert!(vm.apply(QuizIntent::Next));
        assert!(vm.apply(QuizIntent::Next));
        assert!(!vm.apply(QuizIntent::Next));
        assert!(vm.question().unwrap().is_last);
        assert_eq!(vm.progress_percent(), 100);
    }

    #[test]
    fn answers_survive_navigation() {
        let mut vm = ready_vm();
        assert!(vm.apply(QuizIntent::Choose(1)));
        vm.apply(QuizIntent::Next);
        assert!(vm.apply(QuizIntent::Write("Madrid".into())));
        assert_eq!(vm.question().unwrap().text_answer.as_deref(), Some("Madrid"));

        vm.apply(QuizIntent::Previous);
        let question = vm.question().unwrap();
        assert!(question.options[1].selected);
        assert!(!question.options[0].selected);
        assert_eq!(vm.answered_label(), "2 of 3 answered");
    }

    #[test]
    fn invalid_answers_are_ignored() {
        let mut vm = ready_vm();
        assert!(!vm.apply(QuizIntent::Choose(7)));
        assert!(!vm.apply(QuizIntent::Write("Paris".into())));
        assert_eq!(vm.answered_label(), "0 of 3 answered");
    }

    #[test]
    fn submit_failure_returns_to_ready_with_answers() {
        let mut vm = ready_vm();
        vm.apply(QuizIntent::Choose(0));

        let attempt = vm.begin_submit().unwrap();
        assert_eq!(attempt.submission().answers().len(), 3);
        assert_eq!(vm.phase(), QuizFlowPhase::Submitting);
        assert!(!vm.apply(QuizIntent::Next));
        assert!(vm.begin_submit().is_none());

        vm.finish_submit(Err(ViewError::Unknown));
        assert_eq!(vm.phase(), QuizFlowPhase::Ready);
        let alert = vm.dismiss_alert().unwrap();
        assert!(!alert.leave);
        assert_eq!(alert.message, SUBMIT_FAILED);
        assert_eq!(vm.answered_label(), "1 of 3 answered");
    }

    #[test]
    fn submit_success_is_done() {
        let mut vm = ready_vm();
        vm.begin_submit().unwrap();
        vm.finish_submit(Ok(QuizResult { score_percent: 66 }));
        assert_eq!(vm.phase(), QuizFlowPhase::Done { score_percent: 66 });
        assert!(vm.alert().is_none());
    }

    #[test]
    fn load_failure_alerts_and_leaves() {
        let mut vm = QuizFlowVm::new();
        vm.begin_loading();
        vm.finish_loading(Err(ViewError::NotFound));
        assert_eq!(vm.phase(), QuizFlowPhase::Error(ViewError::NotFound));
        assert!(vm.alert().unwrap().leave);
        assert!(vm.question().is_none());
        assert!(vm.begin_submit().is_none());
    }
}
