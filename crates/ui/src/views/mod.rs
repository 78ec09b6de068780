mod analytics;
mod auth;
pub(crate) mod components;
mod create_essay;
mod create_quiz;
mod essay;
mod progress;
mod quiz;
mod state;
mod student_dashboard;
mod teacher_dashboard;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use analytics::AnalyticsView;
pub use auth::{SignInView, SignUpView};
pub use create_essay::CreateEssayView;
pub use create_quiz::CreateQuizView;
pub use essay::EssayView;
pub use progress::ProgressView;
pub use quiz::QuizView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use student_dashboard::StudentDashboardView;
pub use teacher_dashboard::TeacherDashboardView;
