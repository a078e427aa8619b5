use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::models::{NewTrainee, Trainee, TraineeFilter, UpdateTrainee};
use crate::db::DbResult;

pub struct TraineeRepository;

impl TraineeRepository {
    /// Self-registration. New trainees always start `pending`; the tag code
    /// stays empty until an admin approves them.
    pub async fn create(pool: &PgPool, new_trainee: &NewTrainee) -> DbResult<Trainee> {
        let trainee = sqlx::query_as::<_, Trainee>(
            "INSERT INTO trainees \
                 (first_name, last_name, email, phone_number, gender, address, sponsor_id, passport_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id, first_name, last_name, email, phone_number, gender, address, \
                       sponsor_id, passport_url, tag_code, status, created_at, updated_at",
        )
        .bind(&new_trainee.first_name)
        .bind(&new_trainee.last_name)
        .bind(new_trainee.email.to_lowercase())
        .bind(&new_trainee.phone_number)
        .bind(&new_trainee.gender)
        .bind(&new_trainee.address)
        .bind(new_trainee.sponsor_id)
        .bind(&new_trainee.passport_url)
        .fetch_one(pool)
        .await?;

        Ok(trainee)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> DbResult<Option<Trainee>> {
        let trainee = sqlx::query_as::<_, Trainee>(
            "SELECT id, first_name, last_name, email, phone_number, gender, address, \
                    sponsor_id, passport_url, tag_code, status, created_at, updated_at \
             FROM trainees WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(trainee)
    }

    pub async fn list(pool: &PgPool, filter: &TraineeFilter) -> DbResult<Vec<Trainee>> {
        let trainees = sqlx::query_as::<_, Trainee>(
            "SELECT id, first_name, last_name, email, phone_number, gender, address, \
                    sponsor_id, passport_url, tag_code, status, created_at, updated_at \
             FROM trainees \
             WHERE ($1::person_status IS NULL OR status = $1) \
               AND ($2::uuid IS NULL OR sponsor_id = $2) \
             ORDER BY created_at DESC",
        )
        .bind(filter.status)
        .bind(filter.sponsor_id)
        .fetch_all(pool)
        .await?;

        Ok(trainees)
    }

    pub async fn update(pool: &PgPool, id: Uuid, update: &UpdateTrainee) -> DbResult<Trainee> {
        let trainee = sqlx::query_as::<_, Trainee>(
            "UPDATE trainees SET \
                 first_name = COALESCE($2, first_name), \
                 last_name = COALESCE($3, last_name), \
                 phone_number = COALESCE($4, phone_number), \
                 gender = COALESCE($5, gender), \
                 address = COALESCE($6, address), \
                 sponsor_id = COALESCE($7, sponsor_id), \
                 passport_url = COALESCE($8, passport_url), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, first_name, last_name, email, phone_number, gender, address, \
                       sponsor_id, passport_url, tag_code, status, created_at, updated_at",
        )
        .bind(id)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.phone_number)
        .bind(&update.gender)
        .bind(&update.address)
        .bind(update.sponsor_id)
        .bind(&update.passport_url)
        .fetch_one(pool)
        .await?;

        Ok(trainee)
    }

    /// Approves a pending trainee: claims a tag code (the given one, or the
    /// lowest available when `tag_id` is `None`) and activates the trainee,
    /// both in one transaction. Returns `None` when no tag could be claimed,
    /// which the caller reports as a conflict.
    pub async fn approve(
        pool: &PgPool,
        trainee: &Trainee,
        tag_id: Option<Uuid>,
    ) -> DbResult<Option<Trainee>> {
        let mut tx: Transaction<'_, Postgres> = pool.begin().await?;
        let holder_name = format!("{} {}", trainee.first_name, trainee.last_name);

        let claimed: Option<(String,)> = match tag_id {
            Some(id) => {
                sqlx::query_as(
                    "UPDATE generated_ids SET \
                         status = 'assigned', holder_id = $2, holder_name = $3, \
                         assigned_at = NOW(), updated_at = NOW() \
                     WHERE id = $1 AND kind = 'tag' AND status = 'available' \
                     RETURNING code",
                )
                .bind(id)
                .bind(trainee.id)
                .bind(&holder_name)
                .fetch_optional(&mut *tx)
                .await?
            }
            None => {
                sqlx::query_as(
                    "UPDATE generated_ids SET \
                         status = 'assigned', holder_id = $1, holder_name = $2, \
                         assigned_at = NOW(), updated_at = NOW() \
                     WHERE id = (SELECT id FROM generated_ids \
                                 WHERE kind = 'tag' AND status = 'available' \
                                 ORDER BY sequence LIMIT 1) \
                     RETURNING code",
                )
                .bind(trainee.id)
                .bind(&holder_name)
                .fetch_optional(&mut *tx)
                .await?
            }
        };

        let code = match claimed {
            Some((code,)) => code,
            None => {
                tx.rollback().await?;
                return Ok(None);
            }
        };

        let approved = sqlx::query_as::<_, Trainee>(
            "UPDATE trainees SET tag_code = $2, status = 'active', updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, first_name, last_name, email, phone_number, gender, address, \
                       sponsor_id, passport_url, tag_code, status, created_at, updated_at",
        )
        .bind(trainee.id)
        .bind(&code)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(approved))
    }

    /// Deactivates a trainee and, in the same transaction, deactivates the
    /// tag code they hold. A tag code with no matching pool record is left
    /// alone rather than treated as an error.
    pub async fn deactivate(pool: &PgPool, trainee: &Trainee) -> DbResult<Trainee> {
        let mut tx: Transaction<'_, Postgres> = pool.begin().await?;

        let deactivated = sqlx::query_as::<_, Trainee>(
            "UPDATE trainees SET status = 'deactivated', updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, first_name, last_name, email, phone_number, gender, address, \
                       sponsor_id, passport_url, tag_code, status, created_at, updated_at",
        )
        .bind(trainee.id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(code) = &deactivated.tag_code {
            sqlx::query(
                "UPDATE generated_ids SET \
                     status = 'deactivated', deactivated_at = NOW(), updated_at = NOW() \
                 WHERE code = $1 AND status IN ('assigned', 'activated')",
            )
            .bind(code)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(deactivated)
    }
}
