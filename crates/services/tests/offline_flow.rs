use api::demo::{DEMO_PASSWORD, DEMO_STUDENT_EMAIL, DEMO_TEACHER_EMAIL};
use atheno_core::model::{
    EssayDraft, QuestionDraft, QuestionDraftKind, QuestionId, QuizDraft, QuizDraftError, Role,
};
use atheno_core::time::fixed_now;
use services::{AppServices, AuthError, AuthoringError, Clock, SignUpForm};

fn services() -> AppServices {
    AppServices::offline(Clock::fixed(fixed_now())).expect("offline services")
}

#[tokio::test]
async fn sign_in_resolves_role_and_sign_out_clears_it() {
    let services = services();
    let auth = services.auth();
    assert_eq!(auth.current_user().await.unwrap(), None);

    let teacher = auth
        .sign_in(DEMO_TEACHER_EMAIL, DEMO_PASSWORD)
        .await
        .expect("sign in");
    assert_eq!(teacher.role, Role::Teacher);
    assert_eq!(auth.current_user().await.unwrap(), Some(teacher));

    auth.sign_out();
    assert!(!auth.is_signed_in());
    assert_eq!(auth.current_user().await.unwrap(), None);
}

#[tokio::test]
async fn wrong_password_is_an_identity_error() {
    let services = services();
    let err = services
        .auth()
        .sign_in(DEMO_STUDENT_EMAIL, "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Identity(_)));
    assert!(!services.auth().is_signed_in());
}

#[tokio::test]
async fn sign_up_registers_backend_user() {
    let services = services();
    let user = services
        .auth()
        .sign_up(&SignUpForm {
            name: "New Student".into(),
            email: "new@school.dev".into(),
            password: "password1".into(),
            confirm_password: "password1".into(),
            role: Role::Student,
        })
        .await
        .expect("sign up");
    assert_eq!(user.role, Role::Student);
    assert_eq!(user.name, "New Student");

    let dashboard = services.dashboards().student_dashboard().await.unwrap();
    assert_eq!(dashboard.pending_quizzes.len(), 2);
}

#[tokio::test]
async fn student_quiz_round_trip_updates_progress() {
    let services = services();
    services
        .auth()
        .sign_in(DEMO_STUDENT_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();

    let dashboard = services.dashboards().student_dashboard().await.unwrap();
    let quiz_id = dashboard.pending_quizzes[0].id;

    let quiz_taking = services.quiz_taking();
    let mut attempt = quiz_taking.start(quiz_id).await.unwrap();
    attempt.select_option(QuestionId::new(0), 0).unwrap();
    attempt.go_next();
    attempt.go_next();
    attempt.select_option(QuestionId::new(2), 1).unwrap();

    let result = quiz_taking.submit(&attempt).await.unwrap();
    assert_eq!(result.score_percent, 75);

    let progress = services.dashboards().student_progress().await.unwrap();
    assert!((progress.analytics.average_quiz_score - 75.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn teacher_authoring_shows_up_on_dashboard() {
    let services = services();
    services
        .auth()
        .sign_in(DEMO_TEACHER_EMAIL, DEMO_PASSWORD)
        .await
        .unwrap();
    let authoring = services.authoring();

    let err = authoring.create_quiz(&QuizDraft::default()).await.unwrap_err();
    assert!(matches!(err, AuthoringError::Quiz(QuizDraftError::EmptyTitle)));

    let quiz = authoring
        .create_quiz(&QuizDraft {
            title: "Capitals".into(),
            description: String::new(),
            questions: vec![QuestionDraft {
                text: "Capital of France?".into(),
                kind: QuestionDraftKind::ShortAnswer {
                    expected: "Paris".into(),
                },
            }],
        })
        .await
        .unwrap();
    authoring
        .create_essay(&EssayDraft {
            title: "Summer".into(),
            prompt: "What did you do this summer?".into(),
            word_limit: Some(200),
            ..EssayDraft::default()
        })
        .await
        .unwrap();

    let dashboard = services.dashboards().teacher_dashboard().await.unwrap();
    assert_eq!(dashboard.quizzes.len(), 3);
    assert_eq!(dashboard.essays.len(), 3);
    assert!(dashboard.quizzes.iter().any(|q| q.id == quiz.id()));

    let reports = services.dashboards().teacher_analytics().await.unwrap();
    assert_eq!(reports.len(), 3);
    let report = reports.iter().find(|r| r.quiz.id == quiz.id()).unwrap();
    let analytics = report.analytics.as_ref().unwrap();
    assert_eq!(analytics.submission_count(), 0);
}
