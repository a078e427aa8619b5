use secrecy::ExposeSecret;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Admin, DashboardCounts, NewAdmin, UpdateAdmin};
use crate::db::{DatabaseError, DbResult};

pub struct AdminRepository;

impl AdminRepository {
    pub async fn create(pool: &PgPool, new_admin: &NewAdmin) -> DbResult<Admin> {
        let password_hash =
            bcrypt::hash(new_admin.password.expose_secret(), bcrypt::DEFAULT_COST)
                .map_err(|e| DatabaseError::InvalidInput(format!("password hashing failed: {e}")))?;

        let admin = sqlx::query_as::<_, Admin>(
            "INSERT INTO admins (email, password_hash, first_name, last_name, role) \
             VALUES ($1, $2, $3, $4, COALESCE($5::admin_role, 'admin')) \
             RETURNING id, email, password_hash, first_name, last_name, role, is_active, \
                       last_login_at, created_at, updated_at",
        )
        .bind(new_admin.email.to_lowercase())
        .bind(password_hash)
        .bind(&new_admin.first_name)
        .bind(&new_admin.last_name)
        .bind(new_admin.role.clone())
        .fetch_one(pool)
        .await?;

        Ok(admin)
    }

    pub async fn get_by_id(pool: &PgPool, admin_id: Uuid) -> DbResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, email, password_hash, first_name, last_name, role, is_active, \
                    last_login_at, created_at, updated_at \
             FROM admins WHERE id = $1",
        )
        .bind(admin_id)
        .fetch_optional(pool)
        .await?;

        Ok(admin)
    }

    pub async fn get_by_email(pool: &PgPool, email: &str) -> DbResult<Option<Admin>> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, email, password_hash, first_name, last_name, role, is_active, \
                    last_login_at, created_at, updated_at \
             FROM admins WHERE email = $1",
        )
        .bind(email.to_lowercase())
        .fetch_optional(pool)
        .await?;

        Ok(admin)
    }

    pub async fn list(pool: &PgPool) -> DbResult<Vec<Admin>> {
        let admins = sqlx::query_as::<_, Admin>(
            "SELECT id, email, password_hash, first_name, last_name, role, is_active, \
                    last_login_at, created_at, updated_at \
             FROM admins ORDER BY created_at",
        )
        .fetch_all(pool)
        .await?;

        Ok(admins)
    }

    pub async fn update(pool: &PgPool, admin_id: Uuid, update: &UpdateAdmin) -> DbResult<Admin> {
        let admin = sqlx::query_as::<_, Admin>(
            "UPDATE admins SET \
                 first_name = COALESCE($1, first_name), \
                 last_name = COALESCE($2, last_name), \
                 role = COALESCE($3::admin_role, role), \
                 is_active = COALESCE($4, is_active), \
                 updated_at = NOW() \
             WHERE id = $5 \
             RETURNING id, email, password_hash, first_name, last_name, role, is_active, \
                       last_login_at, created_at, updated_at",
        )
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(update.role.clone())
        .bind(update.is_active)
        .bind(admin_id)
        .fetch_one(pool)
        .await?;

        Ok(admin)
    }

    /// Stamps `last_login_at` after a successful credential check.
    pub async fn record_login(pool: &PgPool, admin_id: Uuid) -> DbResult<Admin> {
        let admin = sqlx::query_as::<_, Admin>(
            "UPDATE admins SET last_login_at = NOW(), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, email, password_hash, first_name, last_name, role, is_active, \
                       last_login_at, created_at, updated_at",
        )
        .bind(admin_id)
        .fetch_one(pool)
        .await?;

        Ok(admin)
    }

    pub async fn dashboard_counts(pool: &PgPool) -> DbResult<DashboardCounts> {
        let counts = sqlx::query_as::<_, DashboardCounts>(
            "SELECT \
                 (SELECT COUNT(*) FROM trainees) AS trainees_total, \
                 (SELECT COUNT(*) FROM trainees WHERE status = 'pending') AS trainees_pending, \
                 (SELECT COUNT(*) FROM trainees WHERE status = 'active') AS trainees_active, \
                 (SELECT COUNT(*) FROM staff) AS staff_total, \
                 (SELECT COUNT(*) FROM resource_persons) AS resource_persons_total, \
                 (SELECT COUNT(*) FROM generated_ids WHERE status = 'available') AS ids_available, \
                 (SELECT COUNT(*) FROM generated_ids WHERE status = 'assigned') AS ids_assigned, \
                 (SELECT COUNT(*) FROM generated_ids WHERE status = 'activated') AS ids_activated, \
                 (SELECT COUNT(*) FROM generated_ids WHERE status = 'deactivated') AS ids_deactivated, \
                 (SELECT COUNT(*) FROM exams) AS exams_total, \
                 (SELECT COUNT(*) FROM exam_attempts WHERE submitted_at IS NOT NULL) AS attempts_submitted, \
                 (SELECT COUNT(*) FROM announcements) AS announcements_total, \
                 (SELECT COUNT(*) FROM videos) AS videos_total, \
                 (SELECT COUNT(*) FROM files) AS files_total, \
                 (SELECT COUNT(*) FROM certificates) AS certificates_total",
        )
        .fetch_one(pool)
        .await?;

        Ok(counts)
    }
}
