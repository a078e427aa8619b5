use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use std::collections::HashMap;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "question_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    FillBlank,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Exam {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    /// Percentage a submitted attempt must reach to pass.
    pub pass_mark: f64,
    pub is_published: bool,
    pub sponsor_id: Option<Uuid>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ExamQuestion {
    pub id: Uuid,
    pub exam_id: Uuid,
    pub question_text: String,
    pub question_type: QuestionType,
    /// Choice labels for multiple-choice questions, JSON array of strings.
    pub options: Option<serde_json::Value>,
    /// For fill-blank questions this holds comma-separated acceptable answers.
    pub correct_answer: String,
    pub position: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// The question shape served to a trainee taking an exam. Notably without
/// `correct_answer`.
#[derive(Debug, Clone, Serialize)]
pub struct TakerQuestion {
    pub id: Uuid,
    pub question_text: String,
    pub question_type: QuestionType,
    pub options: Option<serde_json::Value>,
    pub position: i32,
}

impl From<ExamQuestion> for TakerQuestion {
    fn from(q: ExamQuestion) -> Self {
        TakerQuestion {
            id: q.id,
            question_text: q.question_text,
            question_type: q.question_type,
            options: q.options,
            position: q.position,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ExamAttempt {
    pub id: Uuid,
    pub exam_id: Uuid,
    pub trainee_id: Uuid,
    /// Submitted answers as a question-id -> answer map. Empty until
    /// submission.
    pub answers: serde_json::Value,
    pub total_questions: i32,
    pub correct_count: Option<i32>,
    pub wrong_count: Option<i32>,
    pub unanswered_count: Option<i32>,
    pub score_percent: Option<f64>,
    pub passed: Option<bool>,
    pub started_at: OffsetDateTime,
    pub submitted_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl ExamAttempt {
    pub fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewExam {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub duration_minutes: i32,
    #[validate(range(min = 0.0, max = 100.0))]
    pub pass_mark: Option<f64>,
    pub sponsor_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateExam {
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub duration_minutes: Option<i32>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub pass_mark: Option<f64>,
    pub is_published: Option<bool>,
    pub sponsor_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewExamQuestion {
    #[validate(length(min = 1))]
    pub question_text: String,
    pub question_type: QuestionType,
    pub options: Option<serde_json::Value>,
    #[validate(length(min = 1))]
    pub correct_answer: String,
    pub position: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateExamQuestion {
    pub question_text: Option<String>,
    pub question_type: Option<QuestionType>,
    pub options: Option<serde_json::Value>,
    pub correct_answer: Option<String>,
    pub position: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct StartAttempt {
    pub trainee_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAttempt {
    pub answers: HashMap<Uuid, String>,
}

#[derive(Debug, Deserialize)]
pub struct ExamFilter {
    pub is_published: Option<bool>,
    pub sponsor_id: Option<Uuid>,
}

/// Outcome of scoring one attempt's answers against an exam's questions.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptScore {
    pub total_questions: i32,
    pub correct_count: i32,
    pub wrong_count: i32,
    pub unanswered_count: i32,
    pub score_percent: f64,
    pub passed: bool,
}

/// Aggregated results over the submitted attempts of one exam.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ExamResultsSummary {
    pub attempts: i64,
    pub submitted: i64,
    pub passed_count: i64,
    pub average_percent: Option<f64>,
    pub highest_percent: Option<f64>,
    pub lowest_percent: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taker_question_hides_the_correct_answer() {
        let question = ExamQuestion {
            id: Uuid::nil(),
            exam_id: Uuid::nil(),
            question_text: "The sky is blue.".into(),
            question_type: QuestionType::TrueFalse,
            options: None,
            correct_answer: "true".into(),
            position: 1,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };

        let json = serde_json::to_value(TakerQuestion::from(question)).unwrap();
        assert!(json.get("correct_answer").is_none());
        assert_eq!(json["question_type"], "true_false");
    }

    #[test]
    fn pass_mark_must_stay_a_percentage() {
        let payload: NewExam = serde_json::from_value(serde_json::json!({
            "title": "Induction CBT",
            "duration_minutes": 30,
            "pass_mark": 250.0,
        }))
        .unwrap();

        assert!(payload.validate().is_err());
    }
}
