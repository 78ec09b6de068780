use atheno_core::model::{
    ActivityKind, ActivityScore, EssaySummary, QuizSummary, RecentActivity, StudentDashboard,
    TeacherDashboard,
};

use crate::vm::time_fmt::format_date;

const EXCERPT_CHARS: usize = 120;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatCardVm {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizCardVm {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub questions_label: String,
    pub created_label: String,
}

impl From<&QuizSummary> for QuizCardVm {
    fn from(quiz: &QuizSummary) -> Self {
        let questions_label = match quiz.question_count {
            1 => "1 question".to_string(),
            n => format!("{n} questions"),
        };
        Self {
            id: quiz.id.value(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            questions_label,
            created_label: format_date(quiz.created_at),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EssayCardVm {
    pub id: u64,
    pub title: String,
    pub prompt_excerpt: String,
    pub limit_label: String,
    pub created_label: String,
}

impl From<&EssaySummary> for EssayCardVm {
    fn from(essay: &EssaySummary) -> Self {
        Self {
            id: essay.id.value(),
            title: essay.title.clone(),
            prompt_excerpt: excerpt(&essay.prompt, EXCERPT_CHARS),
            limit_label: essay
                .word_limit
                .map_or_else(|| "No word limit".to_string(), |limit| format!("Max {limit} words")),
            created_label: format_date(essay.created_at),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivityRowVm {
    pub kind_label: &'static str,
    pub title: String,
    pub score_label: String,
    pub status: String,
    pub date_label: String,
}

impl From<&RecentActivity> for ActivityRowVm {
    fn from(activity: &RecentActivity) -> Self {
        Self {
            kind_label: match activity.kind {
                ActivityKind::Quiz => "Quiz",
                ActivityKind::Essay => "Essay",
            },
            title: activity.title.clone(),
            score_label: match activity.score {
                ActivityScore::Percent(score) => format!("{score}%"),
                ActivityScore::Pending => "Pending".to_string(),
            },
            status: activity.status.clone(),
            date_label: format_date(activity.submitted_at),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentDashboardVm {
    pub stats: Vec<StatCardVm>,
    pub quizzes: Vec<QuizCardVm>,
    pub essays: Vec<EssayCardVm>,
    pub activity: Vec<ActivityRowVm>,
}

#[must_use]
pub fn map_student_dashboard(dashboard: &StudentDashboard) -> StudentDashboardVm {
    StudentDashboardVm {
        stats: vec![
            StatCardVm {
                label: "Pending quizzes",
                value: dashboard.pending_quizzes.len().to_string(),
            },
            StatCardVm {
                label: "Pending essays",
                value: dashboard.pending_essays.len().to_string(),
            },
            StatCardVm {
                label: "Completed",
                value: dashboard.completed_assignments.to_string(),
            },
        ],
        quizzes: dashboard.pending_quizzes.iter().map(QuizCardVm::from).collect(),
        essays: dashboard.pending_essays.iter().map(EssayCardVm::from).collect(),
        activity: dashboard
            .recent_activity
            .iter()
            .map(ActivityRowVm::from)
            .collect(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeacherDashboardVm {
    pub stats: Vec<StatCardVm>,
    pub quizzes: Vec<QuizCardVm>,
    pub essays: Vec<EssayCardVm>,
}

#[must_use]
pub fn map_teacher_dashboard(dashboard: &TeacherDashboard) -> TeacherDashboardVm {
    TeacherDashboardVm {
        stats: vec![
            StatCardVm {
                label: "Quizzes",
                value: dashboard.quizzes.len().to_string(),
            },
            StatCardVm {
                label: "Essays",
                value: dashboard.essays.len().to_string(),
            },
        ],
        quizzes: dashboard.quizzes.iter().map(QuizCardVm::from).collect(),
        essays: dashboard.essays.iter().map(EssayCardVm::from).collect(),
    }
}

fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}
