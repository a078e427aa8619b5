use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{
    AttemptScore, Exam, ExamAttempt, ExamFilter, ExamQuestion, ExamResultsSummary, NewExam,
    NewExamQuestion, UpdateExam, UpdateExamQuestion,
};
use crate::db::DbResult;

pub struct ExamRepository;

impl ExamRepository {
    pub async fn create(pool: &PgPool, new_exam: &NewExam) -> DbResult<Exam> {
        let exam = sqlx::query_as::<_, Exam>(
            "INSERT INTO exams (title, description, duration_minutes, pass_mark, sponsor_id) \
             VALUES ($1, $2, $3, COALESCE($4, 50), $5) \
             RETURNING id, title, description, duration_minutes, pass_mark, is_published, \
                       sponsor_id, created_at, updated_at",
        )
        .bind(&new_exam.title)
        .bind(&new_exam.description)
        .bind(new_exam.duration_minutes)
        .bind(new_exam.pass_mark)
        .bind(new_exam.sponsor_id)
        .fetch_one(pool)
        .await?;

        Ok(exam)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> DbResult<Option<Exam>> {
        let exam = sqlx::query_as::<_, Exam>(
            "SELECT id, title, description, duration_minutes, pass_mark, is_published, \
                    sponsor_id, created_at, updated_at \
             FROM exams WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(exam)
    }

    pub async fn list(pool: &PgPool, filter: &ExamFilter) -> DbResult<Vec<Exam>> {
        let exams = sqlx::query_as::<_, Exam>(
            "SELECT id, title, description, duration_minutes, pass_mark, is_published, \
                    sponsor_id, created_at, updated_at \
             FROM exams \
             WHERE ($1::boolean IS NULL OR is_published = $1) \
               AND ($2::uuid IS NULL OR sponsor_id = $2) \
             ORDER BY created_at DESC",
        )
        .bind(filter.is_published)
        .bind(filter.sponsor_id)
        .fetch_all(pool)
        .await?;

        Ok(exams)
    }

    pub async fn update(pool: &PgPool, id: Uuid, update: &UpdateExam) -> DbResult<Exam> {
        let exam = sqlx::query_as::<_, Exam>(
            "UPDATE exams SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 duration_minutes = COALESCE($4, duration_minutes), \
                 pass_mark = COALESCE($5, pass_mark), \
                 is_published = COALESCE($6, is_published), \
                 sponsor_id = COALESCE($7, sponsor_id), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, title, description, duration_minutes, pass_mark, is_published, \
                       sponsor_id, created_at, updated_at",
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.duration_minutes)
        .bind(update.pass_mark)
        .bind(update.is_published)
        .bind(update.sponsor_id)
        .fetch_one(pool)
        .await?;

        Ok(exam)
    }

    /// Appends a question; without an explicit position it lands after the
    /// exam's current last question.
    pub async fn add_question(
        pool: &PgPool,
        exam_id: Uuid,
        new_question: &NewExamQuestion,
    ) -> DbResult<ExamQuestion> {
        let question = sqlx::query_as::<_, ExamQuestion>(
            "INSERT INTO exam_questions \
                 (exam_id, question_text, question_type, options, correct_answer, position) \
             VALUES ($1, $2, $3, $4, $5, \
                     COALESCE($6, (SELECT COALESCE(MAX(position), 0) + 1 \
                                   FROM exam_questions WHERE exam_id = $1))) \
             RETURNING id, exam_id, question_text, question_type, options, correct_answer, \
                       position, created_at, updated_at",
        )
        .bind(exam_id)
        .bind(&new_question.question_text)
        .bind(new_question.question_type)
        .bind(&new_question.options)
        .bind(&new_question.correct_answer)
        .bind(new_question.position)
        .fetch_one(pool)
        .await?;

        Ok(question)
    }

    pub async fn list_questions(pool: &PgPool, exam_id: Uuid) -> DbResult<Vec<ExamQuestion>> {
        let questions = sqlx::query_as::<_, ExamQuestion>(
            "SELECT id, exam_id, question_text, question_type, options, correct_answer, \
                    position, created_at, updated_at \
             FROM exam_questions WHERE exam_id = $1 \
             ORDER BY position, created_at",
        )
        .bind(exam_id)
        .fetch_all(pool)
        .await?;

        Ok(questions)
    }

    pub async fn update_question(
        pool: &PgPool,
        exam_id: Uuid,
        question_id: Uuid,
        update: &UpdateExamQuestion,
    ) -> DbResult<ExamQuestion> {
        let question = sqlx::query_as::<_, ExamQuestion>(
            "UPDATE exam_questions SET \
                 question_text = COALESCE($3, question_text), \
                 question_type = COALESCE($4::question_type, question_type), \
                 options = COALESCE($5, options), \
                 correct_answer = COALESCE($6, correct_answer), \
                 position = COALESCE($7, position), \
                 updated_at = NOW() \
             WHERE id = $2 AND exam_id = $1 \
             RETURNING id, exam_id, question_text, question_type, options, correct_answer, \
                       position, created_at, updated_at",
        )
        .bind(exam_id)
        .bind(question_id)
        .bind(&update.question_text)
        .bind(update.question_type)
        .bind(&update.options)
        .bind(&update.correct_answer)
        .bind(update.position)
        .fetch_one(pool)
        .await?;

        Ok(question)
    }

    /// Questions are the one record that is hard-deleted: they are exam
    /// authoring material, not lifecycle history.
    pub async fn delete_question(pool: &PgPool, exam_id: Uuid, question_id: Uuid) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM exam_questions WHERE id = $2 AND exam_id = $1")
            .bind(exam_id)
            .bind(question_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_attempt(
        pool: &PgPool,
        exam_id: Uuid,
        trainee_id: Uuid,
    ) -> DbResult<Option<ExamAttempt>> {
        let attempt = sqlx::query_as::<_, ExamAttempt>(
            "SELECT id, exam_id, trainee_id, answers, total_questions, correct_count, \
                    wrong_count, unanswered_count, score_percent, passed, started_at, \
                    submitted_at, created_at, updated_at \
             FROM exam_attempts WHERE exam_id = $1 AND trainee_id = $2",
        )
        .bind(exam_id)
        .bind(trainee_id)
        .fetch_optional(pool)
        .await?;

        Ok(attempt)
    }

    /// Opens an attempt. The unique index on (exam_id, trainee_id) turns a
    /// racing duplicate into a `Duplicate` error even when the caller's
    /// lookup saw none.
    pub async fn start_attempt(
        pool: &PgPool,
        exam_id: Uuid,
        trainee_id: Uuid,
        total_questions: i32,
    ) -> DbResult<ExamAttempt> {
        let attempt = sqlx::query_as::<_, ExamAttempt>(
            "INSERT INTO exam_attempts (exam_id, trainee_id, total_questions) \
             VALUES ($1, $2, $3) \
             RETURNING id, exam_id, trainee_id, answers, total_questions, correct_count, \
                       wrong_count, unanswered_count, score_percent, passed, started_at, \
                       submitted_at, created_at, updated_at",
        )
        .bind(exam_id)
        .bind(trainee_id)
        .bind(total_questions)
        .fetch_one(pool)
        .await?;

        Ok(attempt)
    }

    pub async fn get_attempt(pool: &PgPool, attempt_id: Uuid) -> DbResult<Option<ExamAttempt>> {
        let attempt = sqlx::query_as::<_, ExamAttempt>(
            "SELECT id, exam_id, trainee_id, answers, total_questions, correct_count, \
                    wrong_count, unanswered_count, score_percent, passed, started_at, \
                    submitted_at, created_at, updated_at \
             FROM exam_attempts WHERE id = $1",
        )
        .bind(attempt_id)
        .fetch_optional(pool)
        .await?;

        Ok(attempt)
    }

    /// Finalizes an attempt with its scored result. `total_questions` is
    /// refreshed from the scored question set in case the exam was edited
    /// after the attempt started.
    pub async fn submit_attempt(
        pool: &PgPool,
        attempt_id: Uuid,
        answers: &serde_json::Value,
        score: &AttemptScore,
    ) -> DbResult<ExamAttempt> {
        let attempt = sqlx::query_as::<_, ExamAttempt>(
            "UPDATE exam_attempts SET \
                 answers = $2, \
                 total_questions = $3, \
                 correct_count = $4, \
                 wrong_count = $5, \
                 unanswered_count = $6, \
                 score_percent = $7, \
                 passed = $8, \
                 submitted_at = NOW(), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, exam_id, trainee_id, answers, total_questions, correct_count, \
                       wrong_count, unanswered_count, score_percent, passed, started_at, \
                       submitted_at, created_at, updated_at",
        )
        .bind(attempt_id)
        .bind(answers)
        .bind(score.total_questions)
        .bind(score.correct_count)
        .bind(score.wrong_count)
        .bind(score.unanswered_count)
        .bind(score.score_percent)
        .bind(score.passed)
        .fetch_one(pool)
        .await?;

        Ok(attempt)
    }

    pub async fn list_attempts_for_exam(pool: &PgPool, exam_id: Uuid) -> DbResult<Vec<ExamAttempt>> {
        let attempts = sqlx::query_as::<_, ExamAttempt>(
            "SELECT id, exam_id, trainee_id, answers, total_questions, correct_count, \
                    wrong_count, unanswered_count, score_percent, passed, started_at, \
                    submitted_at, created_at, updated_at \
             FROM exam_attempts WHERE exam_id = $1 \
             ORDER BY started_at DESC",
        )
        .bind(exam_id)
        .fetch_all(pool)
        .await?;

        Ok(attempts)
    }

    pub async fn list_attempts_for_trainee(
        pool: &PgPool,
        trainee_id: Uuid,
    ) -> DbResult<Vec<ExamAttempt>> {
        let attempts = sqlx::query_as::<_, ExamAttempt>(
            "SELECT id, exam_id, trainee_id, answers, total_questions, correct_count, \
                    wrong_count, unanswered_count, score_percent, passed, started_at, \
                    submitted_at, created_at, updated_at \
             FROM exam_attempts WHERE trainee_id = $1 \
             ORDER BY started_at DESC",
        )
        .bind(trainee_id)
        .fetch_all(pool)
        .await?;

        Ok(attempts)
    }

    pub async fn results_summary(pool: &PgPool, exam_id: Uuid) -> DbResult<ExamResultsSummary> {
        let summary = sqlx::query_as::<_, ExamResultsSummary>(
            "SELECT COUNT(*) AS attempts, \
                    COUNT(submitted_at) AS submitted, \
                    COUNT(*) FILTER (WHERE passed) AS passed_count, \
                    AVG(score_percent) AS average_percent, \
                    MAX(score_percent) AS highest_percent, \
                    MIN(score_percent) AS lowest_percent \
             FROM exam_attempts WHERE exam_id = $1",
        )
        .bind(exam_id)
        .fetch_one(pool)
        .await?;

        Ok(summary)
    }
}
