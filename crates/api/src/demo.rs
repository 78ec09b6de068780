//! Demo accounts and content for offline mode.

use atheno_core::model::{
    CriterionDraft, EssayDraft, QuestionDraft, QuestionDraftKind, QuizDraft, Role, User,
};

use crate::error::ApiError;
use crate::gateway::Registration;
use crate::identity::LocalIdentity;
use crate::memory::InMemoryBackend;

pub const DEMO_PASSWORD: &str = "atheno-demo";
pub const DEMO_TEACHER_EMAIL: &str = "teacher@atheno.dev";
pub const DEMO_STUDENT_EMAIL: &str = "student@atheno.dev";

const DEMO_TEACHER_UID: &str = "demo-teacher";
const DEMO_STUDENT_UID: &str = "demo-student";

fn multiple_choice(text: &str, options: &[&str], correct: usize) -> QuestionDraft {
    QuestionDraft {
        text: text.to_string(),
        kind: QuestionDraftKind::MultipleChoice {
            options: options.iter().map(|o| (*o).to_string()).collect(),
            correct: Some(correct),
        },
    }
}

fn demo_quizzes() -> Vec<QuizDraft> {
    vec![
        QuizDraft {
            title: "Fractions warm-up".into(),
            description: "Five minutes on adding and comparing fractions.".into(),
            questions: vec![
                multiple_choice("What is 1/2 + 1/4?", &["3/4", "2/6", "1/8", "1"], 0),
                multiple_choice("Which is larger?", &["2/3", "3/5"], 0),
                multiple_choice("Simplify 6/8.", &["3/5", "3/4", "2/3"], 1),
                QuestionDraft {
                    text: "Write 0.5 as a fraction in lowest terms.".into(),
                    kind: QuestionDraftKind::ShortAnswer {
                        expected: "1/2".into(),
                    },
                },
            ],
        },
        QuizDraft {
            title: "Cell biology basics".into(),
            description: String::new(),
            questions: vec![
                multiple_choice(
                    "Which organelle produces most of a cell's ATP?",
                    &["Nucleus", "Mitochondrion", "Ribosome", "Golgi apparatus"],
                    1,
                ),
                multiple_choice("Plant cells have a cell wall.", &["True", "False"], 0),
            ],
        },
    ]
}

fn demo_essays() -> Vec<EssayDraft> {
    vec![
        EssayDraft {
            title: "The fall of Rome".into(),
            prompt: "Explain two causes of the fall of the Western Roman Empire and argue which mattered more."
                .into(),
            word_limit: Some(250),
            ..EssayDraft::default()
        },
        EssayDraft {
            title: "A place that matters".into(),
            prompt: "Describe a place that is important to you and why.".into(),
            criteria: vec![
                CriterionDraft::new("imagery", 10),
                CriterionDraft::new("voice", 10),
            ],
            word_limit: None,
        },
    ]
}

/// Register the demo teacher and student with `identity`, create their
/// backend users, and publish the demo quizzes and essays.
///
/// # Errors
///
/// Returns `ApiError` if the backend state cannot be written or a demo draft
/// fails validation.
pub fn seed(identity: &LocalIdentity, backend: &InMemoryBackend) -> Result<(User, User), ApiError> {
    identity.add_account(DEMO_TEACHER_EMAIL, DEMO_PASSWORD, DEMO_TEACHER_UID);
    identity.add_account(DEMO_STUDENT_EMAIL, DEMO_PASSWORD, DEMO_STUDENT_UID);

    let teacher = backend.insert_user(&Registration {
        email: DEMO_TEACHER_EMAIL.into(),
        name: "Ms. Rivera".into(),
        role: Role::Teacher,
        identity_uid: DEMO_TEACHER_UID.into(),
    })?;
    let student = backend.insert_user(&Registration {
        email: DEMO_STUDENT_EMAIL.into(),
        name: "Sam Student".into(),
        role: Role::Student,
        identity_uid: DEMO_STUDENT_UID.into(),
    })?;

    for draft in demo_quizzes() {
        let quiz = draft
            .validate()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        backend.insert_quiz(teacher.id, &quiz)?;
    }
    for draft in demo_essays() {
        let essay = draft
            .validate()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        backend.insert_essay(teacher.id, &essay)?;
    }

    log::info!(
        "seeded demo content: teacher {DEMO_TEACHER_EMAIL}, student {DEMO_STUDENT_EMAIL}"
    );
    Ok((teacher, student))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_drafts_all_validate() {
        for quiz in demo_quizzes() {
            assert!(quiz.validate().is_ok(), "{}", quiz.title);
        }
        for essay in demo_essays() {
            assert!(essay.validate().is_ok(), "{}", essay.title);
        }
    }
}
