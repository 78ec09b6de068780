use services::{QuizReport, StudentProgress};

use crate::vm::time_fmt::format_percent;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizReportRowVm {
    pub quiz_id: u64,
    pub title: String,
    pub average_label: String,
    pub submissions_label: String,
}

impl From<&QuizReport> for QuizReportRowVm {
    fn from(report: &QuizReport) -> Self {
        let submissions = report
            .analytics
            .as_ref()
            .map_or(0, |analytics| analytics.submission_count());
        let average_label = match &report.analytics {
            Some(analytics) if submissions > 0 => format_percent(analytics.average_score),
            _ => "No submissions".to_string(),
        };
        Self {
            quiz_id: report.quiz.id.value(),
            title: report.quiz.title.clone(),
            average_label,
            submissions_label: match submissions {
                1 => "1 submission".to_string(),
                n => format!("{n} submissions"),
            },
        }
    }
}

#[must_use]
pub fn map_quiz_reports(reports: &[QuizReport]) -> Vec<QuizReportRowVm> {
    reports.iter().map(QuizReportRowVm::from).collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentProgressVm {
    pub name: String,
    pub quiz_average_label: String,
    pub essay_average_label: String,
}

impl From<&StudentProgress> for StudentProgressVm {
    fn from(progress: &StudentProgress) -> Self {
        Self {
            name: progress.user.display_name().to_string(),
            quiz_average_label: format_percent(progress.analytics.average_quiz_score),
            essay_average_label: format_percent(progress.analytics.average_essay_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atheno_core::model::{QuizAnalytics, QuizId, QuizSummary, StudentScore, UserId};

    fn report(scores: &[f64]) -> QuizReport {
        let student_scores: Vec<_> = scores
            .iter()
            .enumerate()
            .map(|(i, score)| StudentScore {
                student_id: UserId::new(i as u64 + 10),
                score: *score,
            })
            .collect();
        QuizReport {
            quiz: QuizSummary {
                id: QuizId::new(3),
                title: "Fractions".into(),
                description: None,
                question_count: 4,
                created_at: None,
            },
            analytics: Some(QuizAnalytics {
                quiz_id: QuizId::new(3),
                average_score: if scores.is_empty() {
                    0.0
                } else {
                    scores.iter().sum::<f64>() / scores.len() as f64
                },
                student_scores,
            }),
        }
    }

    #[test]
    fn averages_are_shown_only_with_submissions() {
        let row = QuizReportRowVm::from(&report(&[50.0, 100.0]));
        assert_eq!(row.average_label, "75.0%");
        assert_eq!(row.submissions_label, "2 submissions");

        let empty = QuizReportRowVm::from(&report(&[]));
        assert_eq!(empty.average_label, "No submissions");
        assert_eq!(empty.submissions_label, "0 submissions");

        let missing = QuizReportRowVm::from(&QuizReport {
            analytics: None,
            ..report(&[])
        });
        assert_eq!(missing.average_label, "No submissions");
    }
}
