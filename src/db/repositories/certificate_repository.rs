use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::models::{format_serial, Certificate, CertificateFilter, IssueCertificate};
use crate::db::DbResult;

pub struct CertificateRepository;

impl CertificateRepository {
    /// Issues a certificate with the next serial in the global sequence. The
    /// unique constraints on serial and sequence back this up under
    /// concurrent issuance.
    pub async fn issue(pool: &PgPool, issue: &IssueCertificate) -> DbResult<Certificate> {
        let mut tx: Transaction<'_, Postgres> = pool.begin().await?;

        let (last,): (i32,) = sqlx::query_as("SELECT COALESCE(MAX(sequence), 0) FROM certificates")
            .fetch_one(&mut *tx)
            .await?;
        let sequence = last + 1;

        let certificate = sqlx::query_as::<_, Certificate>(
            "INSERT INTO certificates (trainee_id, title, serial, sequence, exam_attempt_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, trainee_id, title, serial, sequence, exam_attempt_id, issued_at, \
                       revoked, created_at, updated_at",
        )
        .bind(issue.trainee_id)
        .bind(&issue.title)
        .bind(format_serial(sequence))
        .bind(sequence)
        .bind(issue.exam_attempt_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(certificate)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> DbResult<Option<Certificate>> {
        let certificate = sqlx::query_as::<_, Certificate>(
            "SELECT id, trainee_id, title, serial, sequence, exam_attempt_id, issued_at, \
                    revoked, created_at, updated_at \
             FROM certificates WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(certificate)
    }

    pub async fn get_by_serial(pool: &PgPool, serial: &str) -> DbResult<Option<Certificate>> {
        let certificate = sqlx::query_as::<_, Certificate>(
            "SELECT id, trainee_id, title, serial, sequence, exam_attempt_id, issued_at, \
                    revoked, created_at, updated_at \
             FROM certificates WHERE serial = $1",
        )
        .bind(serial)
        .fetch_optional(pool)
        .await?;

        Ok(certificate)
    }

    pub async fn list(pool: &PgPool, filter: &CertificateFilter) -> DbResult<Vec<Certificate>> {
        let certificates = sqlx::query_as::<_, Certificate>(
            "SELECT id, trainee_id, title, serial, sequence, exam_attempt_id, issued_at, \
                    revoked, created_at, updated_at \
             FROM certificates \
             WHERE ($1::uuid IS NULL OR trainee_id = $1) \
             ORDER BY sequence DESC",
        )
        .bind(filter.trainee_id)
        .fetch_all(pool)
        .await?;

        Ok(certificates)
    }

    pub async fn revoke(pool: &PgPool, id: Uuid) -> DbResult<Certificate> {
        let certificate = sqlx::query_as::<_, Certificate>(
            "UPDATE certificates SET revoked = TRUE, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, trainee_id, title, serial, sequence, exam_attempt_id, issued_at, \
                       revoked, created_at, updated_at",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(certificate)
    }
}
