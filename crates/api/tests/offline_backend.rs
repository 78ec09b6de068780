use std::sync::Arc;

use api::demo::{self, DEMO_PASSWORD, DEMO_STUDENT_EMAIL, DEMO_TEACHER_EMAIL};
use api::{ApiError, Backend, IdentityProvider, InMemoryBackend, LocalIdentity, TokenSource};
use atheno_core::model::{ActivityScore, EssayComposition, QuizAttempt};
use atheno_core::time::fixed_clock;

fn offline() -> (Arc<LocalIdentity>, InMemoryBackend) {
    let identity = Arc::new(LocalIdentity::new(fixed_clock()));
    let tokens: Arc<dyn TokenSource> = identity.clone();
    let memory = InMemoryBackend::new(tokens, fixed_clock());
    demo::seed(&identity, &memory).expect("seed");
    (identity, memory)
}

#[tokio::test]
async fn student_takes_a_quiz_and_dashboard_updates() {
    let (identity, memory) = offline();
    let backend = Backend::in_memory(memory);

    identity
        .sign_in(DEMO_STUDENT_EMAIL, DEMO_PASSWORD)
        .await
        .expect("sign in");
    let before = backend.dashboards.student_dashboard().await.unwrap();
    assert_eq!(before.pending_quizzes.len(), 2);
    assert_eq!(before.pending_essays.len(), 2);
    assert_eq!(before.completed_assignments, 0);

    let quiz_id = before.pending_quizzes[0].id;
    let quiz = backend.quizzes.quiz(quiz_id).await.unwrap();
    assert!(quiz.questions().iter().all(|q| q.correct().is_none()));

    let mut attempt = QuizAttempt::start(quiz).unwrap();
    let first = attempt.current_question().id();
    attempt.select_option(first, 0).unwrap();
    let result = backend.quizzes.submit_quiz(&attempt.submission()).await.unwrap();
    // Q1 right, Q2 defaults to the right option, Q3 defaults wrong, Q4 blank.
    assert_eq!(result.score_percent, 50);

    let after = backend.dashboards.student_dashboard().await.unwrap();
    assert_eq!(after.pending_quizzes.len(), 1);
    assert_eq!(after.completed_assignments, 1);
    assert_eq!(after.recent_activity[0].score, ActivityScore::Percent(50));
}

#[tokio::test]
async fn essay_draft_then_submit() {
    let (identity, memory) = offline();
    let backend = Backend::in_memory(memory.clone());
    identity
        .sign_in(DEMO_STUDENT_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();
    let student = backend.accounts.current_user().await.unwrap();

    let dashboard = backend.dashboards.student_dashboard().await.unwrap();
    let essay = backend
        .essays
        .essay(dashboard.pending_essays[0].id)
        .await
        .unwrap();
    let essay_id = essay.id();

    let mut composition = EssayComposition::new(essay);
    composition.set_text("Rome fell slowly.");
    backend.essays.save_draft(&composition.draft().unwrap()).await.unwrap();
    assert_eq!(
        memory.draft_for(essay_id, student.id).as_deref(),
        Some("Rome fell slowly.")
    );

    backend
        .essays
        .submit_essay(&composition.submission().unwrap())
        .await
        .unwrap();
    assert_eq!(memory.draft_for(essay_id, student.id), None);

    let dashboard = backend.dashboards.student_dashboard().await.unwrap();
    assert_eq!(dashboard.pending_essays.len(), 1);
    assert_eq!(dashboard.recent_activity[0].score, ActivityScore::Pending);
}

#[tokio::test]
async fn teacher_sees_own_content_and_analytics() {
    let (identity, memory) = offline();
    let backend = Backend::in_memory(memory);

    identity
        .sign_in(DEMO_STUDENT_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();
    let student = backend.accounts.current_user().await.unwrap();
    let quiz_id = backend.dashboards.student_dashboard().await.unwrap().pending_quizzes[1].id;
    let attempt = QuizAttempt::start(backend.quizzes.quiz(quiz_id).await.unwrap()).unwrap();
    backend.quizzes.submit_quiz(&attempt.submission()).await.unwrap();
    identity.sign_out();

    identity
        .sign_in(DEMO_TEACHER_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();
    assert_eq!(backend.quizzes.teacher_quizzes().await.unwrap().len(), 2);
    assert_eq!(backend.essays.teacher_essays().await.unwrap().len(), 2);

    let analytics = backend.analytics.quiz_analytics(quiz_id).await.unwrap();
    assert_eq!(analytics.submission_count(), 1);
    assert_eq!(analytics.student_scores[0].student_id, student.id);

    let progress = backend.analytics.student_analytics(student.id).await.unwrap();
    assert!((progress.average_quiz_score - analytics.average_score).abs() < f64::EPSILON);
}

#[tokio::test]
async fn signed_out_calls_fail_with_missing_token() {
    let (_identity, memory) = offline();
    let backend = Backend::in_memory(memory);
    assert_eq!(
        backend.dashboards.student_dashboard().await.unwrap_err(),
        ApiError::MissingToken
    );
}
