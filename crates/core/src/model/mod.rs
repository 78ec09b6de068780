mod answers;
mod attempt;
pub mod authoring;
mod dashboard;
mod essay;
mod ids;
mod quiz;
mod user;

pub use ids::{EssayId, ParseIdError, QuestionId, QuizId, SubmissionId, UserId};

pub use answers::{Answer, AnswerMap};
pub use attempt::{AttemptError, QuizAttempt, QuizResult, QuizSubmission};
pub use authoring::{
    CriterionDraft, EssayDraft, EssayDraftError, MAX_CRITERION_SCORE, NewEssay, NewQuiz,
    QuestionDraft, QuestionDraftKind, QuizDraft, QuizDraftError, default_criteria,
};
pub use dashboard::{
    ActivityKind, ActivityScore, EssaySummary, QuizAnalytics, QuizSummary, RecentActivity,
    StudentAnalytics, StudentDashboard, StudentScore, TeacherDashboard,
};
pub use essay::{
    Essay, EssayComposition, EssayError, EssaySubmission, Rubric, RubricCriterion,
    WordLimitStatus, count_words, word_limit_status,
};
pub use quiz::{Question, QuestionKind, Quiz, QuizError};
pub use user::{ParseRoleError, Role, User};
