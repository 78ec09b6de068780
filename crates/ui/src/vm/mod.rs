mod analytics_vm;
mod auth_vm;
mod builder_vm;
mod dashboard_vm;
mod essay_vm;
mod quiz_vm;
pub(crate) mod time_fmt;

pub use analytics_vm::{QuizReportRowVm, StudentProgressVm, map_quiz_reports};
pub use auth_vm::{FormStatus, auth_error_message};
pub use builder_vm::{
    CriterionInput, EssayBuilderVm, QuizBuilderVm, authoring_error_message, essay_draft_message,
    quiz_draft_message,
};
pub use dashboard_vm::{
    ActivityRowVm, EssayCardVm, QuizCardVm, StatCardVm, StudentDashboardVm, TeacherDashboardVm,
    map_student_dashboard, map_teacher_dashboard,
};
pub use essay_vm::{EssaySaveState, EssayVm, RubricRowVm, RubricVm, essay_error_message};
pub use quiz_vm::{QuestionVm, QuizAlert, QuizFlowPhase, QuizFlowVm, QuizIntent, QuizOptionVm};
