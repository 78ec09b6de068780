use std::sync::Arc;

use api::{AccountGateway, AnalyticsGateway, ApiError, DashboardGateway, EssayGateway, QuizGateway};
use atheno_core::model::{
    EssaySummary, QuizAnalytics, QuizId, QuizSummary, StudentAnalytics, StudentDashboard,
    TeacherDashboard, User,
};

use crate::error::DashboardError;

/// One row of the teacher analytics page.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizReport {
    pub quiz: QuizSummary,
    /// `None` when the backend has nothing for this quiz yet.
    pub analytics: Option<QuizAnalytics>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentProgress {
    pub user: User,
    pub analytics: StudentAnalytics,
}

/// Read-only views: dashboards and server-computed analytics.
#[derive(Clone)]
pub struct DashboardService {
    accounts: Arc<dyn AccountGateway>,
    quizzes: Arc<dyn QuizGateway>,
    essays: Arc<dyn EssayGateway>,
    dashboards: Arc<dyn DashboardGateway>,
    analytics: Arc<dyn AnalyticsGateway>,
}

impl DashboardService {
    #[must_use]
    pub fn new(
        accounts: Arc<dyn AccountGateway>,
        quizzes: Arc<dyn QuizGateway>,
        essays: Arc<dyn EssayGateway>,
        dashboards: Arc<dyn DashboardGateway>,
        analytics: Arc<dyn AnalyticsGateway>,
    ) -> Self {
        Self {
            accounts,
            quizzes,
            essays,
            dashboards,
            analytics,
        }
    }

    /// # Errors
    ///
    /// Returns `DashboardError::Api` if the dashboard cannot be fetched.
    pub async fn student_dashboard(&self) -> Result<StudentDashboard, DashboardError> {
        let dashboard = self
            .dashboards
            .student_dashboard()
            .await
            .inspect_err(|err| log::warn!("student dashboard failed: {err}"))?;
        log::debug!(
            "student dashboard: {} pending, {} completed",
            dashboard.pending_count(),
            dashboard.completed_assignments
        );
        Ok(dashboard)
    }

    /// The teacher's own quizzes and essays.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Api` if either list cannot be fetched.
    pub async fn teacher_dashboard(&self) -> Result<TeacherDashboard, DashboardError> {
        let quizzes = self
            .quizzes
            .teacher_quizzes()
            .await
            .inspect_err(|err| log::warn!("teacher quizzes failed: {err}"))?;
        let essays = self
            .essays
            .teacher_essays()
            .await
            .inspect_err(|err| log::warn!("teacher essays failed: {err}"))?;
        Ok(TeacherDashboard {
            quizzes: quizzes.iter().map(QuizSummary::from).collect(),
            essays: essays.iter().map(EssaySummary::from).collect(),
        })
    }

    /// # Errors
    ///
    /// Returns `DashboardError::Api` if the analytics cannot be fetched.
    pub async fn quiz_analytics(&self, quiz_id: QuizId) -> Result<QuizAnalytics, DashboardError> {
        Ok(self.analytics.quiz_analytics(quiz_id).await?)
    }

    /// Analytics for each of the teacher's quizzes, in list order.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Api` if the quiz list or any analytics call
    /// fails with something other than not-found.
    pub async fn teacher_analytics(&self) -> Result<Vec<QuizReport>, DashboardError> {
        let quizzes = self.quizzes.teacher_quizzes().await?;
        let mut reports = Vec::with_capacity(quizzes.len());
        for quiz in &quizzes {
            let analytics = match self.analytics.quiz_analytics(quiz.id()).await {
                Ok(analytics) => Some(analytics),
                Err(ApiError::NotFound) => None,
                Err(err) => {
                    log::warn!("analytics for quiz {} failed: {err}", quiz.id());
                    return Err(err.into());
                }
            };
            reports.push(QuizReport {
                quiz: QuizSummary::from(quiz),
                analytics,
            });
        }
        Ok(reports)
    }

    /// The signed-in student's own averages.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Api` if the profile or analytics cannot be fetched.
    pub async fn student_progress(&self) -> Result<StudentProgress, DashboardError> {
        let user = self.accounts.current_user().await?;
        let analytics = self.analytics.student_analytics(user.id).await?;
        Ok(StudentProgress { user, analytics })
    }
}
