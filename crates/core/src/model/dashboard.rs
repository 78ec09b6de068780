use chrono::{DateTime, Utc};

use crate::model::essay::Essay;
use crate::model::ids::{EssayId, QuizId, UserId};
use crate::model::quiz::Quiz;

/// A quiz or essay as listed on a dashboard, without its questions or rubric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub id: QuizId,
    pub title: String,
    pub description: Option<String>,
    pub question_count: usize,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Quiz> for QuizSummary {
    fn from(quiz: &Quiz) -> Self {
        Self {
            id: quiz.id(),
            title: quiz.title().to_string(),
            description: quiz.description().map(str::to_string),
            question_count: quiz.question_count(),
            created_at: quiz.created_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EssaySummary {
    pub id: EssayId,
    pub title: String,
    pub prompt: String,
    pub word_limit: Option<u32>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Essay> for EssaySummary {
    fn from(essay: &Essay) -> Self {
        Self {
            id: essay.id(),
            title: essay.title().to_string(),
            prompt: essay.prompt().to_string(),
            word_limit: essay.word_limit(),
            created_at: essay.created_at(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Quiz,
    Essay,
}

/// Score column of the recent-activity table. Essays stay pending until graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityScore {
    Percent(u32),
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentActivity {
    pub kind: ActivityKind,
    pub title: String,
    pub score: ActivityScore,
    pub status: String,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDashboard {
    pub pending_quizzes: Vec<QuizSummary>,
    pub pending_essays: Vec<EssaySummary>,
    pub completed_assignments: u32,
    pub recent_activity: Vec<RecentActivity>,
}

impl StudentDashboard {
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending_quizzes.len() + self.pending_essays.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeacherDashboard {
    pub quizzes: Vec<QuizSummary>,
    pub essays: Vec<EssaySummary>,
}

//
// ─── ANALYTICS ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub struct StudentScore {
    pub student_id: UserId,
    pub score: f64,
}

/// Server-computed quiz statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAnalytics {
    pub quiz_id: QuizId,
    pub average_score: f64,
    pub student_scores: Vec<StudentScore>,
}

impl QuizAnalytics {
    #[must_use]
    pub fn submission_count(&self) -> usize {
        self.student_scores.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentAnalytics {
    pub student_id: UserId,
    pub average_quiz_score: f64,
    pub average_essay_score: f64,
}
