use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::models::{NewStaff, PersonStatus, Staff, UpdateStaff};
use crate::db::DbResult;

pub struct StaffRepository;

impl StaffRepository {
    /// Creates a staff member and claims the lowest available staff code for
    /// them in one transaction. Returns `None` when the staff-code pool is
    /// exhausted; nothing is inserted in that case.
    pub async fn create(pool: &PgPool, new_staff: &NewStaff) -> DbResult<Option<Staff>> {
        let mut tx: Transaction<'_, Postgres> = pool.begin().await?;

        let staff = sqlx::query_as::<_, Staff>(
            "INSERT INTO staff (first_name, last_name, email, phone_number, designation) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, first_name, last_name, email, phone_number, designation, \
                       staff_code, status, created_at, updated_at",
        )
        .bind(&new_staff.first_name)
        .bind(&new_staff.last_name)
        .bind(new_staff.email.to_lowercase())
        .bind(&new_staff.phone_number)
        .bind(&new_staff.designation)
        .fetch_one(&mut *tx)
        .await?;

        let holder_name = format!("{} {}", staff.first_name, staff.last_name);
        let claimed: Option<(String,)> = sqlx::query_as(
            "UPDATE generated_ids SET \
                 status = 'assigned', holder_id = $1, holder_name = $2, \
                 assigned_at = NOW(), updated_at = NOW() \
             WHERE id = (SELECT id FROM generated_ids \
                         WHERE kind = 'staff' AND status = 'available' \
                         ORDER BY sequence LIMIT 1) \
             RETURNING code",
        )
        .bind(staff.id)
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

        let staff = sqlx::query_as::<_, Staff>(
            "UPDATE staff SET staff_code = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, first_name, last_name, email, phone_number, designation, \
                       staff_code, status, created_at, updated_at",
        )
        .bind(staff.id)
        .bind(&code)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(staff))
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> DbResult<Option<Staff>> {
        let staff = sqlx::query_as::<_, Staff>(
            "SELECT id, first_name, last_name, email, phone_number, designation, \
                    staff_code, status, created_at, updated_at \
             FROM staff WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(staff)
    }

    pub async fn list(pool: &PgPool, status: Option<PersonStatus>) -> DbResult<Vec<Staff>> {
        let staff = sqlx::query_as::<_, Staff>(
            "SELECT id, first_name, last_name, email, phone_number, designation, \
                    staff_code, status, created_at, updated_at \
             FROM staff \
             WHERE ($1::person_status IS NULL OR status = $1) \
             ORDER BY created_at DESC",
        )
        .bind(status)
        .fetch_all(pool)
        .await?;

        Ok(staff)
    }

    pub async fn update(pool: &PgPool, id: Uuid, update: &UpdateStaff) -> DbResult<Staff> {
        let staff = sqlx::query_as::<_, Staff>(
            "UPDATE staff SET \
                 first_name = COALESCE($2, first_name), \
                 last_name = COALESCE($3, last_name), \
                 phone_number = COALESCE($4, phone_number), \
                 designation = COALESCE($5, designation), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, first_name, last_name, email, phone_number, designation, \
                       staff_code, status, created_at, updated_at",
        )
        .bind(id)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.phone_number)
        .bind(&update.designation)
        .fetch_one(pool)
        .await?;

        Ok(staff)
    }

    pub async fn deactivate(pool: &PgPool, staff: &Staff) -> DbResult<Staff> {
        let mut tx: Transaction<'_, Postgres> = pool.begin().await?;

        let deactivated = sqlx::query_as::<_, Staff>(
            "UPDATE staff SET status = 'deactivated', updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, first_name, last_name, email, phone_number, designation, \
                       staff_code, status, created_at, updated_at",
        )
        .bind(staff.id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(code) = &deactivated.staff_code {
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
