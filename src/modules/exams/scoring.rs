//! Answer matching and attempt scoring. Everything here is pure so the
//! grading rules can be tested without a database.

use std::collections::HashMap;

use uuid::Uuid;

use crate::db::models::{AttemptScore, ExamQuestion, QuestionType};

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Canonical form for true/false answers: `yes` and `no` count as synonyms
/// of `true` and `false`. Anything else is left as typed.
fn canonical_truth(raw: &str) -> String {
    let normalized = normalize(raw);
    match normalized.as_str() {
        "yes" => "true".to_string(),
        "no" => "false".to_string(),
        _ => normalized,
    }
}

/// Whether a submitted answer is correct for the question. Matching is
/// trimmed and case-insensitive for every type; fill-blank accepts any of
/// the comma-separated alternatives stored in `correct_answer`.
pub fn answer_matches(question: &ExamQuestion, submitted: &str) -> bool {
    match question.question_type {
        QuestionType::MultipleChoice => normalize(submitted) == normalize(&question.correct_answer),
        QuestionType::TrueFalse => {
            canonical_truth(submitted) == canonical_truth(&question.correct_answer)
        }
        QuestionType::FillBlank => question
            .correct_answer
            .split(',')
            .any(|alternative| normalize(alternative) == normalize(submitted)),
    }
}

/// Scores one attempt against the exam's question set.
///
/// A question is unanswered when it is missing from the map or blank after
/// trimming; unanswered questions are counted separately from wrong ones.
/// Answers keyed by unknown question ids are ignored. The percentage is
/// rounded to two decimal places and passing is `percent >= pass_mark`.
pub fn score_attempt(
    questions: &[ExamQuestion],
    answers: &HashMap<Uuid, String>,
    pass_mark: f64,
) -> AttemptScore {
    let mut correct = 0;
    let mut wrong = 0;
    let mut unanswered = 0;

    for question in questions {
        let submitted = answers
            .get(&question.id)
            .map(|answer| answer.trim())
            .filter(|answer| !answer.is_empty());

        match submitted {
            None => unanswered += 1,
            Some(answer) => {
                if answer_matches(question, answer) {
                    correct += 1;
                } else {
                    wrong += 1;
                }
            }
        }
    }

    let total = questions.len() as i32;
    let score_percent = if total == 0 {
        0.0
    } else {
        round2(f64::from(correct) / f64::from(total) * 100.0)
    };

    AttemptScore {
        total_questions: total,
        correct_count: correct,
        wrong_count: wrong,
        unanswered_count: unanswered,
        score_percent,
        passed: score_percent >= pass_mark,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn question(id: u128, question_type: QuestionType, correct_answer: &str) -> ExamQuestion {
        ExamQuestion {
            id: Uuid::from_u128(id),
            exam_id: Uuid::nil(),
            question_text: "q".into(),
            question_type,
            options: None,
            correct_answer: correct_answer.into(),
            position: 0,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn answers(pairs: &[(u128, &str)]) -> HashMap<Uuid, String> {
        pairs
            .iter()
            .map(|(id, answer)| (Uuid::from_u128(*id), answer.to_string()))
            .collect()
    }

    #[test]
    fn multiple_choice_ignores_case_and_whitespace() {
        let q = question(1, QuestionType::MultipleChoice, "Hard hat");
        assert!(answer_matches(&q, "hard hat"));
        assert!(answer_matches(&q, "  HARD HAT  "));
        assert!(!answer_matches(&q, "hardhat"));
    }

    #[test]
    fn true_false_accepts_yes_no_synonyms() {
        let q = question(1, QuestionType::TrueFalse, "true");
        assert!(answer_matches(&q, "true"));
        assert!(answer_matches(&q, "Yes"));
        assert!(!answer_matches(&q, "no"));
        assert!(!answer_matches(&q, "false"));

        let q = question(2, QuestionType::TrueFalse, "No");
        assert!(answer_matches(&q, "false"));
        assert!(answer_matches(&q, "NO"));
        assert!(!answer_matches(&q, "yes"));
    }

    #[test]
    fn fill_blank_accepts_any_alternative() {
        let q = question(1, QuestionType::FillBlank, "ppe, personal protective equipment");
        assert!(answer_matches(&q, "PPE"));
        assert!(answer_matches(&q, "Personal Protective Equipment"));
        assert!(!answer_matches(&q, "equipment"));
    }

    #[test]
    fn unanswered_is_missing_or_blank() {
        let questions = vec![
            question(1, QuestionType::TrueFalse, "true"),
            question(2, QuestionType::TrueFalse, "true"),
            question(3, QuestionType::TrueFalse, "true"),
        ];
        // q1 answered wrong, q2 blank, q3 missing
        let submitted = answers(&[(1, "false"), (2, "   ")]);

        let score = score_attempt(&questions, &submitted, 50.0);
        assert_eq!(score.correct_count, 0);
        assert_eq!(score.wrong_count, 1);
        assert_eq!(score.unanswered_count, 2);
        assert_eq!(score.score_percent, 0.0);
        assert!(!score.passed);
    }

    #[test]
    fn unknown_question_ids_are_ignored() {
        let questions = vec![question(1, QuestionType::TrueFalse, "true")];
        let submitted = answers(&[(1, "true"), (99, "whatever")]);

        let score = score_attempt(&questions, &submitted, 50.0);
        assert_eq!(score.total_questions, 1);
        assert_eq!(score.correct_count, 1);
        assert_eq!(score.wrong_count, 0);
        assert_eq!(score.score_percent, 100.0);
    }

    #[test]
    fn percent_is_rounded_to_two_decimals() {
        let questions = vec![
            question(1, QuestionType::TrueFalse, "true"),
            question(2, QuestionType::TrueFalse, "true"),
            question(3, QuestionType::TrueFalse, "true"),
        ];
        let submitted = answers(&[(1, "true")]);

        let score = score_attempt(&questions, &submitted, 50.0);
        // 1/3 = 33.333... -> 33.33
        assert_eq!(score.score_percent, 33.33);
    }

    #[test]
    fn pass_boundary_is_inclusive() {
        let questions = vec![
            question(1, QuestionType::TrueFalse, "true"),
            question(2, QuestionType::TrueFalse, "true"),
        ];
        let submitted = answers(&[(1, "true"), (2, "false")]);

        let at_mark = score_attempt(&questions, &submitted, 50.0);
        assert_eq!(at_mark.score_percent, 50.0);
        assert!(at_mark.passed);

        let above_mark = score_attempt(&questions, &submitted, 50.01);
        assert!(!above_mark.passed);
    }

    #[test]
    fn counts_add_up_across_types() {
        let questions = vec![
            question(1, QuestionType::MultipleChoice, "B"),
            question(2, QuestionType::TrueFalse, "false"),
            question(3, QuestionType::FillBlank, "helmet, hard hat"),
            question(4, QuestionType::MultipleChoice, "A"),
        ];
        let submitted = answers(&[(1, "b"), (2, "no"), (3, "Hard Hat"), (4, "C")]);

        let score = score_attempt(&questions, &submitted, 75.0);
        assert_eq!(score.total_questions, 4);
        assert_eq!(score.correct_count, 3);
        assert_eq!(score.wrong_count, 1);
        assert_eq!(score.unanswered_count, 0);
        assert_eq!(score.score_percent, 75.0);
        assert!(score.passed);
    }
}
