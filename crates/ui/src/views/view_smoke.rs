use std::sync::Arc;

use api::demo::{DEMO_STUDENT_EMAIL, DEMO_TEACHER_EMAIL};
use atheno_core::model::QuizId;

use super::test_harness::{
    FRACTIONS_QUIZ, ROME_ESSAY, UnavailableDashboards, ViewKind, Visitor, setup_view_harness,
    setup_view_harness_with_dashboards,
};

#[tokio::test(flavor = "current_thread")]
async fn sign_in_view_lists_demo_accounts_offline() {
    let mut harness = setup_view_harness(ViewKind::SignIn, Visitor::Anonymous).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Sign in to continue"), "missing subtitle in {html}");
    assert!(html.contains(DEMO_STUDENT_EMAIL), "missing student account in {html}");
    assert!(html.contains(DEMO_TEACHER_EMAIL), "missing teacher account in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn student_dashboard_smoke_lists_pending_work() {
    let mut harness = setup_view_harness(ViewKind::StudentDashboard, Visitor::Student).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains(FRACTIONS_QUIZ), "missing quiz card in {html}");
    assert!(html.contains(ROME_ESSAY), "missing essay card in {html}");
    assert!(html.contains("Start quiz"), "missing quiz link in {html}");
    assert!(html.contains("Nothing submitted yet."), "missing empty activity in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn student_dashboard_shows_submitted_quiz_as_activity() {
    let mut harness = setup_view_harness(ViewKind::StudentDashboard, Visitor::Student).await;
    let quiz_taking = harness.services.quiz_taking();
    let dashboard = harness
        .services
        .dashboards()
        .student_dashboard()
        .await
        .expect("dashboard");
    let quiz_id: QuizId = dashboard
        .pending_quizzes
        .iter()
        .find(|quiz| quiz.title == FRACTIONS_QUIZ)
        .map(|quiz| quiz.id)
        .expect("seeded quiz");
    let attempt = quiz_taking.start(quiz_id).await.expect("start quiz");
    quiz_taking.submit(&attempt).await.expect("submit quiz");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Recent activity"), "missing activity section in {html}");
    assert!(html.contains("0%"), "missing score in {html}");
    assert!(!html.contains("Nothing submitted yet."), "activity still empty in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn signed_out_dashboard_asks_to_sign_in_again() {
    let mut harness = setup_view_harness(ViewKind::StudentDashboard, Visitor::Anonymous).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Please sign in again"), "missing session error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_outage_offers_retry() {
    let mut harness = setup_view_harness_with_dashboards(
        ViewKind::StudentDashboard,
        Visitor::Student,
        Arc::new(UnavailableDashboards),
    )
    .await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz(0), Visitor::Student).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains(FRACTIONS_QUIZ), "missing quiz title in {html}");
    assert!(html.contains("Question 1 of 4"), "missing question number in {html}");
    assert!(html.contains("What is 1/2 + 1/4?"), "missing prompt in {html}");
    assert!(html.contains("0 of 4 answered"), "missing answered count in {html}");
    assert!(!html.contains("Submit quiz"), "submit shown before last question in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn missing_quiz_raises_alert() {
    let mut harness = setup_view_harness(ViewKind::Quiz(9_999), Visitor::Student).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Quiz unavailable"), "missing alert title in {html}");
    assert!(html.contains("alertdialog"), "missing dialog in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn essay_view_smoke_renders_editor_and_limit() {
    let mut harness = setup_view_harness(ViewKind::Essay(0), Visitor::Student).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains(ROME_ESSAY), "missing essay title in {html}");
    assert!(html.contains("0 / 250 words"), "missing word count in {html}");
    assert!(html.contains("Save draft"), "missing draft button in {html}");
    assert!(html.contains("Submit essay"), "missing submit button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn missing_essay_raises_alert() {
    let mut harness = setup_view_harness(ViewKind::Essay(9_999), Visitor::Student).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Essay unavailable"), "missing alert title in {html}");
    assert!(html.contains("alertdialog"), "missing dialog in {html}");
    assert!(!html.contains("Retry"), "unexpected retry panel in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_names_student() {
    let mut harness = setup_view_harness(ViewKind::Progress, Visitor::Student).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Averages for Sam Student"), "missing name in {html}");
    assert!(html.contains("Average quiz score"), "missing quiz average in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn teacher_dashboard_smoke_lists_published_work() {
    let mut harness = setup_view_harness(ViewKind::TeacherDashboard, Visitor::Teacher).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Your quizzes"), "missing quiz section in {html}");
    assert!(html.contains("Cell biology basics"), "missing quiz in {html}");
    assert!(html.contains("A place that matters"), "missing essay in {html}");
    assert!(html.contains("New quiz"), "missing create link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn analytics_view_reports_quizzes_without_submissions() {
    let mut harness = setup_view_harness(ViewKind::Analytics, Visitor::Teacher).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains(FRACTIONS_QUIZ), "missing quiz row in {html}");
    assert!(html.contains("No submissions"), "missing empty average in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn create_quiz_view_starts_with_one_question() {
    let mut harness = setup_view_harness(ViewKind::CreateQuiz, Visitor::Teacher).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Question 1"), "missing first question in {html}");
    assert!(!html.contains("Question 2"), "unexpected second question in {html}");
    assert!(html.contains("Publish quiz"), "missing publish button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn create_essay_view_shows_default_rubric_total() {
    let mut harness = setup_view_harness(ViewKind::CreateEssay, Visitor::Teacher).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Add criterion"), "missing rubric editor in {html}");
    assert!(html.contains("Publish essay"), "missing publish button in {html}");
}
