use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use atheno_core::Clock;
use atheno_core::model::{
    ActivityKind, ActivityScore, Answer, Essay, EssayId, EssaySubmission, EssaySummary, NewEssay,
    NewQuiz, Question, Quiz, QuizAnalytics, QuizId, QuizResult, QuizSubmission, QuizSummary,
    RecentActivity, Role, StudentAnalytics, StudentDashboard, StudentScore, User, UserId,
};
use chrono::{DateTime, Utc};

use crate::error::ApiError;
use crate::gateway::{
    AccountGateway, AnalyticsGateway, DashboardGateway, EssayGateway, QuizGateway, Registration,
};
use crate::identity::TokenSource;

const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone)]
struct QuizRecord {
    quiz_id: QuizId,
    student: UserId,
    score: u32,
    submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct EssayRecord {
    essay_id: EssayId,
    student: UserId,
    submitted_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    users: HashMap<String, User>,
    quizzes: BTreeMap<QuizId, (Quiz, UserId)>,
    essays: BTreeMap<EssayId, (Essay, UserId)>,
    quiz_submissions: Vec<QuizRecord>,
    essay_submissions: Vec<EssayRecord>,
    drafts: HashMap<(EssayId, UserId), String>,
}

impl MemoryState {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Backend that grades and stores everything in process memory.
///
/// Used for offline mode and service tests. Users are looked up by the
/// identity uid that `LocalIdentity` hands out as its token.
#[derive(Clone)]
pub struct InMemoryBackend {
    state: Arc<Mutex<MemoryState>>,
    tokens: Arc<dyn TokenSource>,
    clock: Clock,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new(tokens: Arc<dyn TokenSource>, clock: Clock) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState::default())),
            tokens,
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, ApiError> {
        self.state
            .lock()
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    async fn caller(&self) -> Result<User, ApiError> {
        let token = self.tokens.bearer_token().await?;
        self.lock()?
            .users
            .get(&token)
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }

    async fn teacher(&self) -> Result<User, ApiError> {
        let user = self.caller().await?;
        if user.role == Role::Teacher {
            Ok(user)
        } else {
            Err(ApiError::Unauthorized)
        }
    }

    /// Insert a user record directly, keyed by identity uid.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the state lock is poisoned.
    pub fn insert_user(&self, registration: &Registration) -> Result<User, ApiError> {
        let mut state = self.lock()?;
        let id = UserId::new(state.allocate_id());
        let user = User {
            id,
            email: registration.email.clone(),
            name: registration.name.clone(),
            role: registration.role,
            created_at: Some(self.clock.now()),
        };
        state
            .users
            .insert(registration.identity_uid.clone(), user.clone());
        Ok(user)
    }

    /// Store a quiz authored by `teacher`, assigning it a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the state lock is poisoned.
    pub fn insert_quiz(&self, teacher: UserId, quiz: &NewQuiz) -> Result<Quiz, ApiError> {
        let mut state = self.lock()?;
        let id = QuizId::new(state.allocate_id());
        let stored = Quiz::new(id, quiz.title.clone(), quiz.questions.clone())
            .map_err(|e| ApiError::Decode(e.to_string()))?
            .with_description(quiz.description.clone())
            .with_created_at(Some(self.clock.now()));
        state.quizzes.insert(id, (stored.clone(), teacher));
        Ok(stored)
    }

    /// Store an essay prompt authored by `teacher`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the state lock is poisoned.
    pub fn insert_essay(&self, teacher: UserId, essay: &NewEssay) -> Result<Essay, ApiError> {
        let mut state = self.lock()?;
        let id = EssayId::new(state.allocate_id());
        let stored = Essay::new(
            id,
            essay.title.clone(),
            essay.prompt.clone(),
            essay.rubric.clone(),
            essay.word_limit,
        )
        .with_created_at(Some(self.clock.now()));
        state.essays.insert(id, (stored.clone(), teacher));
        Ok(stored)
    }

    /// Latest saved draft for an essay and student, if any.
    #[must_use]
    pub fn draft_for(&self, essay_id: EssayId, student: UserId) -> Option<String> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.drafts.get(&(essay_id, student)).cloned())
    }
}

fn answer_is_correct(question: &Question, answer: &Answer) -> bool {
    match (question.correct(), answer) {
        (Some(Answer::Choice(expected)), Answer::Choice(given)) => expected == given,
        (Some(Answer::Text(expected)), Answer::Text(given)) => {
            expected.trim().eq_ignore_ascii_case(given.trim())
        }
        _ => false,
    }
}

/// Whole-percent share of correctly answered questions.
fn grade(quiz: &Quiz, submission: &QuizSubmission) -> u32 {
    let total = quiz.question_count();
    if total == 0 {
        return 0;
    }
    let correct = quiz
        .questions()
        .iter()
        .filter(|question| {
            submission
                .answers()
                .get(question.id())
                .is_some_and(|answer| answer_is_correct(question, answer))
        })
        .count();
    u32::try_from(correct * 100 / total).unwrap_or(100)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / f64::from(count) }
}

#[async_trait]
impl AccountGateway for InMemoryBackend {
    async fn current_user(&self) -> Result<User, ApiError> {
        self.caller().await
    }

    async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        if self.lock()?.users.contains_key(&registration.identity_uid) {
            return Err(ApiError::Status(400));
        }
        self.insert_user(registration)
    }
}

#[async_trait]
impl QuizGateway for InMemoryBackend {
    async fn quiz(&self, id: QuizId) -> Result<Quiz, ApiError> {
        let caller = self.caller().await?;
        let state = self.lock()?;
        let (quiz, _) = state.quizzes.get(&id).ok_or(ApiError::NotFound)?;
        if caller.is_teacher() {
            Ok(quiz.clone())
        } else {
            Ok(quiz.redacted())
        }
    }

    async fn create_quiz(&self, quiz: &NewQuiz) -> Result<Quiz, ApiError> {
        let teacher = self.teacher().await?;
        self.insert_quiz(teacher.id, quiz)
    }

    async fn submit_quiz(&self, submission: &QuizSubmission) -> Result<QuizResult, ApiError> {
        let student = self.caller().await?;
        let now = self.clock.now();
        let mut state = self.lock()?;
        let (quiz, _) = state
            .quizzes
            .get(&submission.quiz_id())
            .ok_or(ApiError::NotFound)?;
        let score = grade(quiz, submission);
        state.quiz_submissions.push(QuizRecord {
            quiz_id: submission.quiz_id(),
            student: student.id,
            score,
            submitted_at: now,
        });
        Ok(QuizResult {
            score_percent: score,
        })
    }

    async fn teacher_quizzes(&self) -> Result<Vec<Quiz>, ApiError> {
        let teacher = self.teacher().await?;
        let state = self.lock()?;
        Ok(state
            .quizzes
            .values()
            .filter(|(_, owner)| *owner == teacher.id)
            .map(|(quiz, _)| quiz.clone())
            .collect())
    }
}

#[async_trait]
impl EssayGateway for InMemoryBackend {
    async fn essay(&self, id: EssayId) -> Result<Essay, ApiError> {
        self.caller().await?;
        let state = self.lock()?;
        state
            .essays
            .get(&id)
            .map(|(essay, _)| essay.clone())
            .ok_or(ApiError::NotFound)
    }

    async fn create_essay(&self, essay: &NewEssay) -> Result<Essay, ApiError> {
        let teacher = self.teacher().await?;
        self.insert_essay(teacher.id, essay)
    }

    async fn submit_essay(&self, submission: &EssaySubmission) -> Result<(), ApiError> {
        let student = self.caller().await?;
        let now = self.clock.now();
        let mut state = self.lock()?;
        if !state.essays.contains_key(&submission.essay_id) {
            return Err(ApiError::NotFound);
        }
        state.drafts.remove(&(submission.essay_id, student.id));
        state.essay_submissions.push(EssayRecord {
            essay_id: submission.essay_id,
            student: student.id,
            submitted_at: now,
        });
        Ok(())
    }

    async fn save_draft(&self, draft: &EssaySubmission) -> Result<(), ApiError> {
        let student = self.caller().await?;
        let mut state = self.lock()?;
        if !state.essays.contains_key(&draft.essay_id) {
            return Err(ApiError::NotFound);
        }
        state
            .drafts
            .insert((draft.essay_id, student.id), draft.content.clone());
        Ok(())
    }

    async fn teacher_essays(&self) -> Result<Vec<Essay>, ApiError> {
        let teacher = self.teacher().await?;
        let state = self.lock()?;
        Ok(state
            .essays
            .values()
            .filter(|(_, owner)| *owner == teacher.id)
            .map(|(essay, _)| essay.clone())
            .collect())
    }
}

#[async_trait]
impl DashboardGateway for InMemoryBackend {
    async fn student_dashboard(&self) -> Result<StudentDashboard, ApiError> {
        let student = self.caller().await?;
        let state = self.lock()?;

        let done_quizzes: HashSet<QuizId> = state
            .quiz_submissions
            .iter()
            .filter(|r| r.student == student.id)
            .map(|r| r.quiz_id)
            .collect();
        let done_essays: HashSet<EssayId> = state
            .essay_submissions
            .iter()
            .filter(|r| r.student == student.id)
            .map(|r| r.essay_id)
            .collect();

        let mut activity: Vec<RecentActivity> = state
            .quiz_submissions
            .iter()
            .filter(|r| r.student == student.id)
            .map(|r| RecentActivity {
                kind: ActivityKind::Quiz,
                title: state
                    .quizzes
                    .get(&r.quiz_id)
                    .map(|(q, _)| q.title().to_string())
                    .unwrap_or_default(),
                score: ActivityScore::Percent(r.score),
                status: "completed".into(),
                submitted_at: Some(r.submitted_at),
            })
            .chain(
                state
                    .essay_submissions
                    .iter()
                    .filter(|r| r.student == student.id)
                    .map(|r| RecentActivity {
                        kind: ActivityKind::Essay,
                        title: state
                            .essays
                            .get(&r.essay_id)
                            .map(|(e, _)| e.title().to_string())
                            .unwrap_or_default(),
                        score: ActivityScore::Pending,
                        status: "submitted".into(),
                        submitted_at: Some(r.submitted_at),
                    }),
            )
            .collect();
        activity.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        activity.truncate(RECENT_ACTIVITY_LIMIT);

        Ok(StudentDashboard {
            pending_quizzes: state
                .quizzes
                .values()
                .filter(|(quiz, _)| !done_quizzes.contains(&quiz.id()))
                .map(|(quiz, _)| QuizSummary::from(quiz))
                .collect(),
            pending_essays: state
                .essays
                .values()
                .filter(|(essay, _)| !done_essays.contains(&essay.id()))
                .map(|(essay, _)| EssaySummary::from(essay))
                .collect(),
            completed_assignments: u32::try_from(done_quizzes.len() + done_essays.len())
                .unwrap_or(u32::MAX),
            recent_activity: activity,
        })
    }
}

#[async_trait]
impl AnalyticsGateway for InMemoryBackend {
    async fn quiz_analytics(&self, quiz_id: QuizId) -> Result<QuizAnalytics, ApiError> {
        self.teacher().await?;
        let state = self.lock()?;
        if !state.quizzes.contains_key(&quiz_id) {
            return Err(ApiError::NotFound);
        }
        let student_scores: Vec<StudentScore> = state
            .quiz_submissions
            .iter()
            .filter(|r| r.quiz_id == quiz_id)
            .map(|r| StudentScore {
                student_id: r.student,
                score: f64::from(r.score),
            })
            .collect();
        Ok(QuizAnalytics {
            quiz_id,
            average_score: mean(student_scores.iter().map(|s| s.score)),
            student_scores,
        })
    }

    async fn student_analytics(&self, student_id: UserId) -> Result<StudentAnalytics, ApiError> {
        let caller = self.caller().await?;
        if !caller.is_teacher() && caller.id != student_id {
            return Err(ApiError::Unauthorized);
        }
        let state = self.lock()?;
        Ok(StudentAnalytics {
            student_id,
            average_quiz_score: mean(
                state
                    .quiz_submissions
                    .iter()
                    .filter(|r| r.student == student_id)
                    .map(|r| f64::from(r.score)),
            ),
            // Essays are never graded offline.
            average_essay_score: 0.0,
        })
    }
}
