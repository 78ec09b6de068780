//! Json shapes exchanged with the backend and their mapping to domain types.
//!
//! Reads are lenient: the backend has used both `question` and
//! `question_text`, and both a criteria map and plain prose for rubrics.

use std::collections::BTreeMap;

use atheno_core::model::{
    ActivityKind, ActivityScore, Answer, Essay, EssayId, EssaySummary, NewEssay, NewQuiz,
    Question, QuestionId, QuestionKind, Quiz, QuizAnalytics, QuizId, QuizResult, QuizSubmission,
    QuizSummary, RecentActivity, Role, Rubric, RubricCriterion, StudentAnalytics,
    StudentDashboard, StudentScore, User, UserId,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::gateway::Registration;

/// Accepts RFC 3339 and the backend's naive `2024-05-01T10:00:00.123` form (read as UTC).
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(parse_timestamp)
}

fn percent(score: f64) -> u32 {
    if score.is_finite() {
        score.round().clamp(0.0, 100.0) as u32
    } else {
        0
    }
}

//
// ─── READS ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
pub(crate) struct UserDto {
    id: u64,
    email: String,
    #[serde(default)]
    name: String,
    role: String,
    #[serde(default)]
    created_at: Option<String>,
}

impl UserDto {
    pub(crate) fn into_user(self) -> Result<User, ApiError> {
        let role = self
            .role
            .parse::<Role>()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(User {
            id: UserId::new(self.id),
            email: self.email,
            name: self.name,
            role,
            created_at: timestamp(self.created_at.as_deref()),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CorrectDto {
    Index(usize),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionDto {
    #[serde(default)]
    id: Option<u64>,
    #[serde(alias = "question")]
    question_text: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    correct_answer: Option<CorrectDto>,
}

impl QuestionDto {
    fn into_question(self, position: usize) -> Question {
        let id = QuestionId::new(self.id.unwrap_or(position as u64));
        let short_answer = match self.kind.as_deref() {
            Some(kind) => kind.eq_ignore_ascii_case("short_answer"),
            None => self.options.is_empty(),
        };
        let question = if short_answer {
            Question::short_answer(id, self.question_text)
        } else {
            Question::multiple_choice(id, self.question_text, self.options)
        };
        match self.correct_answer {
            Some(CorrectDto::Index(index)) if !short_answer => {
                question.with_correct(Answer::Choice(index))
            }
            Some(CorrectDto::Text(text)) if short_answer => question.with_correct(Answer::Text(text)),
            _ => question,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuizDto {
    id: u64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    questions: Vec<QuestionDto>,
    #[serde(default)]
    created_at: Option<String>,
}

impl QuizDto {
    pub(crate) fn into_quiz(self) -> Result<Quiz, ApiError> {
        let questions = self
            .questions
            .into_iter()
            .enumerate()
            .map(|(position, dto)| dto.into_question(position))
            .collect();
        let quiz = Quiz::new(QuizId::new(self.id), self.title, questions)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(quiz
            .with_description(self.description)
            .with_created_at(timestamp(self.created_at.as_deref())))
    }
}

#[derive(Debug, Deserialize)]
struct CriterionDto {
    #[serde(default)]
    description: String,
    #[serde(default)]
    max_score: u32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RubricDto {
    Criteria(BTreeMap<String, CriterionDto>),
    Text(String),
}

impl From<RubricDto> for Rubric {
    fn from(dto: RubricDto) -> Self {
        match dto {
            RubricDto::Criteria(map) => Rubric::Criteria(
                map.into_iter()
                    .map(|(name, c)| {
                        (
                            name,
                            RubricCriterion {
                                description: c.description,
                                max_score: c.max_score,
                            },
                        )
                    })
                    .collect(),
            ),
            RubricDto::Text(text) => Rubric::Text(text),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EssayDto {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    prompt: String,
    #[serde(default)]
    rubric: Option<RubricDto>,
    #[serde(default)]
    word_limit: Option<u32>,
    #[serde(default)]
    created_at: Option<String>,
}

impl EssayDto {
    pub(crate) fn into_essay(self) -> Essay {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| format!("Essay {}", self.id));
        Essay::new(
            EssayId::new(self.id),
            title,
            self.prompt,
            self.rubric.map(Rubric::from).unwrap_or_default(),
            self.word_limit,
        )
        .with_created_at(timestamp(self.created_at.as_deref()))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuizResultDto {
    score: f64,
}

impl From<QuizResultDto> for QuizResult {
    fn from(dto: QuizResultDto) -> Self {
        QuizResult {
            score_percent: percent(dto.score),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScoreDto {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct ActivityDto {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    score: Option<ScoreDto>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    submitted_at: Option<String>,
}

impl ActivityDto {
    fn into_activity(self) -> RecentActivity {
        let kind = if self.kind.eq_ignore_ascii_case("essay") {
            ActivityKind::Essay
        } else {
            ActivityKind::Quiz
        };
        let score = match self.score {
            Some(ScoreDto::Number(value)) => ActivityScore::Percent(percent(value)),
            Some(ScoreDto::Text(_)) | None => ActivityScore::Pending,
        };
        RecentActivity {
            kind,
            title: self.title,
            score,
            status: self.status,
            submitted_at: timestamp(self.submitted_at.as_deref()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StudentDashboardDto {
    #[serde(default)]
    completed_assignments: u32,
    #[serde(default)]
    pending_quizzes_list: Vec<QuizDto>,
    #[serde(default)]
    pending_essays_list: Vec<EssayDto>,
    #[serde(default)]
    recent_activity: Vec<ActivityDto>,
}

impl StudentDashboardDto {
    pub(crate) fn into_dashboard(self) -> Result<StudentDashboard, ApiError> {
        let pending_quizzes = self
            .pending_quizzes_list
            .into_iter()
            .map(|dto| dto.into_quiz().map(|quiz| QuizSummary::from(&quiz)))
            .collect::<Result<Vec<_>, _>>()?;
        let pending_essays = self
            .pending_essays_list
            .into_iter()
            .map(|dto| EssaySummary::from(&dto.into_essay()))
            .collect();
        Ok(StudentDashboard {
            pending_quizzes,
            pending_essays,
            completed_assignments: self.completed_assignments,
            recent_activity: self
                .recent_activity
                .into_iter()
                .map(ActivityDto::into_activity)
                .collect(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct StudentPerformanceDto {
    student_id: u64,
    #[serde(default)]
    score: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuizAnalyticsDto {
    quiz_id: u64,
    #[serde(default)]
    average_score: f64,
    #[serde(default)]
    student_performance: Vec<StudentPerformanceDto>,
}

impl From<QuizAnalyticsDto> for QuizAnalytics {
    fn from(dto: QuizAnalyticsDto) -> Self {
        QuizAnalytics {
            quiz_id: QuizId::new(dto.quiz_id),
            average_score: dto.average_score,
            student_scores: dto
                .student_performance
                .into_iter()
                .map(|p| StudentScore {
                    student_id: UserId::new(p.student_id),
                    score: p.score,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StudentAnalyticsDto {
    student_id: u64,
    #[serde(default)]
    average_quiz_score: f64,
    #[serde(default)]
    average_essay_score: f64,
}

impl From<StudentAnalyticsDto> for StudentAnalytics {
    fn from(dto: StudentAnalyticsDto) -> Self {
        StudentAnalytics {
            student_id: UserId::new(dto.student_id),
            average_quiz_score: dto.average_quiz_score,
            average_essay_score: dto.average_essay_score,
        }
    }
}

//
// ─── WRITES ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
pub(crate) struct RegisterBody<'a> {
    email: &'a str,
    name: &'a str,
    role: &'static str,
    firebase_uid: &'a str,
}

impl<'a> From<&'a Registration> for RegisterBody<'a> {
    fn from(registration: &'a Registration) -> Self {
        Self {
            email: &registration.email,
            name: &registration.name,
            role: registration.role.as_str(),
            firebase_uid: &registration.identity_uid,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum AnswerBody<'a> {
    Choice(usize),
    Text(&'a str),
}

impl<'a> From<&'a Answer> for AnswerBody<'a> {
    fn from(answer: &'a Answer) -> Self {
        match answer {
            Answer::Choice(index) => AnswerBody::Choice(*index),
            Answer::Text(text) => AnswerBody::Text(text),
        }
    }
}

/// `{"answers": {"0": 2, "1": "Paris"}}`, keyed by question id.
#[derive(Debug, Serialize)]
pub(crate) struct SubmitQuizBody<'a> {
    answers: BTreeMap<String, AnswerBody<'a>>,
}

impl<'a> From<&'a QuizSubmission> for SubmitQuizBody<'a> {
    fn from(submission: &'a QuizSubmission) -> Self {
        Self {
            answers: submission
                .answers()
                .iter()
                .map(|(id, answer)| (id.to_string(), AnswerBody::from(answer)))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ContentBody<'a> {
    pub(crate) content: &'a str,
}

#[derive(Debug, Serialize)]
struct NewQuestionBody<'a> {
    question_text: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    options: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    correct_answer: Option<AnswerBody<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewQuizBody<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    questions: Vec<NewQuestionBody<'a>>,
}

impl<'a> From<&'a NewQuiz> for NewQuizBody<'a> {
    fn from(quiz: &'a NewQuiz) -> Self {
        Self {
            title: &quiz.title,
            description: quiz.description.as_deref(),
            questions: quiz
                .questions
                .iter()
                .map(|question| NewQuestionBody {
                    question_text: question.prompt(),
                    kind: match question.kind() {
                        QuestionKind::MultipleChoice { .. } => "multiple_choice",
                        QuestionKind::ShortAnswer => "short_answer",
                    },
                    options: question.options(),
                    correct_answer: question.correct().map(AnswerBody::from),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CriterionBody<'a> {
    description: &'a str,
    max_score: u32,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RubricBody<'a> {
    Criteria(BTreeMap<&'a str, CriterionBody<'a>>),
    Text(&'a str),
}

#[derive(Debug, Serialize)]
pub(crate) struct NewEssayBody<'a> {
    title: &'a str,
    prompt: &'a str,
    rubric: RubricBody<'a>,
    word_limit: Option<u32>,
}

impl<'a> From<&'a NewEssay> for NewEssayBody<'a> {
    fn from(essay: &'a NewEssay) -> Self {
        let rubric = match &essay.rubric {
            Rubric::Criteria(criteria) => RubricBody::Criteria(
                criteria
                    .iter()
                    .map(|(name, c)| {
                        (
                            name.as_str(),
                            CriterionBody {
                                description: &c.description,
                                max_score: c.max_score,
                            },
                        )
                    })
                    .collect(),
            ),
            Rubric::Text(text) => RubricBody::Text(text),
        };
        Self {
            title: &essay.title,
            prompt: &essay.prompt,
            rubric,
            word_limit: essay.word_limit,
        }
    }
}
