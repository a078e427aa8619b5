use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::models::{NewResourcePerson, PersonStatus, ResourcePerson, UpdateResourcePerson};
use crate::db::DbResult;

pub struct ResourcePersonRepository;

impl ResourcePersonRepository {
    /// Creates a resource person and claims the lowest available RP code for
    /// them in one transaction. Returns `None` when the pool is exhausted.
    pub async fn create(
        pool: &PgPool,
        new_rp: &NewResourcePerson,
    ) -> DbResult<Option<ResourcePerson>> {
        let mut tx: Transaction<'_, Postgres> = pool.begin().await?;

        let rp = sqlx::query_as::<_, ResourcePerson>(
            "INSERT INTO resource_persons (first_name, last_name, email, phone_number, specialization) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, first_name, last_name, email, phone_number, specialization, \
                       rp_code, status, created_at, updated_at",
        )
        .bind(&new_rp.first_name)
        .bind(&new_rp.last_name)
        .bind(new_rp.email.to_lowercase())
        .bind(&new_rp.phone_number)
        .bind(&new_rp.specialization)
        .fetch_one(&mut *tx)
        .await?;

        let holder_name = format!("{} {}", rp.first_name, rp.last_name);
        let claimed: Option<(String,)> = sqlx::query_as(
            "UPDATE generated_ids SET \
                 status = 'assigned', holder_id = $1, holder_name = $2, \
                 assigned_at = NOW(), updated_at = NOW() \
             WHERE id = (SELECT id FROM generated_ids \
                         WHERE kind = 'resource_person' AND status = 'available' \
                         ORDER BY sequence LIMIT 1) \
             RETURNING code",
        )
        .bind(rp.id)
        .bind(&holder_name)
        .fetch_optional(&mut *tx)
        .await?;

        let code = match claimed {
            Some((code,)) => code,
            None => {
                tx.rollback().await?;
                return Ok(None);
            }
        };

        let rp = sqlx::query_as::<_, ResourcePerson>(
            "UPDATE resource_persons SET rp_code = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, first_name, last_name, email, phone_number, specialization, \
                       rp_code, status, created_at, updated_at",
        )
        .bind(rp.id)
        .bind(&code)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(rp))
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> DbResult<Option<ResourcePerson>> {
        let rp = sqlx::query_as::<_, ResourcePerson>(
            "SELECT id, first_name, last_name, email, phone_number, specialization, \
                    rp_code, status, created_at, updated_at \
             FROM resource_persons WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(rp)
    }

    pub async fn list(pool: &PgPool, status: Option<PersonStatus>) -> DbResult<Vec<ResourcePerson>> {
        let rps = sqlx::query_as::<_, ResourcePerson>(
            "SELECT id, first_name, last_name, email, phone_number, specialization, \
                    rp_code, status, created_at, updated_at \
             FROM resource_persons \
             WHERE ($1::person_status IS NULL OR status = $1) \
             ORDER BY created_at DESC",
        )
        .bind(status)
        .fetch_all(pool)
        .await?;

        Ok(rps)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        update: &UpdateResourcePerson,
    ) -> DbResult<ResourcePerson> {
        let rp = sqlx::query_as::<_, ResourcePerson>(
            "UPDATE resource_persons SET \
                 first_name = COALESCE($2, first_name), \
                 last_name = COALESCE($3, last_name), \
                 phone_number = COALESCE($4, phone_number), \
                 specialization = COALESCE($5, specialization), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, first_name, last_name, email, phone_number, specialization, \
                       rp_code, status, created_at, updated_at",
        )
        .bind(id)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.phone_number)
        .bind(&update.specialization)
        .fetch_one(pool)
        .await?;

        Ok(rp)
    }

    pub async fn deactivate(pool: &PgPool, rp: &ResourcePerson) -> DbResult<ResourcePerson> {
        let mut tx: Transaction<'_, Postgres> = pool.begin().await?;

        let deactivated = sqlx::query_as::<_, ResourcePerson>(
            "UPDATE resource_persons SET status = 'deactivated', updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, first_name, last_name, email, phone_number, specialization, \
                       rp_code, status, created_at, updated_at",
        )
        .bind(rp.id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(code) = &deactivated.rp_code {
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
