use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::db::models::{GeneratedId, IdFilter, IdKind};
use crate::db::DbResult;

pub struct IdRepository;

impl IdRepository {
    /// Batch-creates `count` fresh codes of one kind, continuing the kind's
    /// sequence. Released or deactivated codes are never re-minted: the next
    /// sequence always starts past the historical maximum.
    pub async fn generate_batch(pool: &PgPool, kind: IdKind, count: i32) -> DbResult<Vec<GeneratedId>> {
        let mut tx: Transaction<'_, Postgres> = pool.begin().await?;

        let (start,): (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(sequence), 0) FROM generated_ids WHERE kind = $1",
        )
        .bind(kind)
        .fetch_one(&mut *tx)
        .await?;

        let mut generated = Vec::with_capacity(count as usize);
        for offset in 1..=count {
            let sequence = start + offset;
            let row = sqlx::query_as::<_, GeneratedId>(
                "INSERT INTO generated_ids (code, kind, sequence) \
                 VALUES ($1, $2, $3) \
                 RETURNING id, code, kind, status, sequence, holder_id, holder_name, \
                           assigned_at, activated_at, deactivated_at, created_at, updated_at",
            )
            .bind(kind.format_code(sequence))
            .bind(kind)
            .bind(sequence)
            .fetch_one(&mut *tx)
            .await?;
            generated.push(row);
        }

        tx.commit().await?;
        Ok(generated)
    }

    pub async fn list(pool: &PgPool, filter: &IdFilter) -> DbResult<Vec<GeneratedId>> {
        let ids = sqlx::query_as::<_, GeneratedId>(
            "SELECT id, code, kind, status, sequence, holder_id, holder_name, \
                    assigned_at, activated_at, deactivated_at, created_at, updated_at \
             FROM generated_ids \
             WHERE ($1::id_kind IS NULL OR kind = $1) \
               AND ($2::id_status IS NULL OR status = $2) \
             ORDER BY kind, sequence",
        )
        .bind(filter.kind)
        .bind(filter.status)
        .fetch_all(pool)
        .await?;

        Ok(ids)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> DbResult<Option<GeneratedId>> {
        let record = sqlx::query_as::<_, GeneratedId>(
            "SELECT id, code, kind, status, sequence, holder_id, holder_name, \
                    assigned_at, activated_at, deactivated_at, created_at, updated_at \
             FROM generated_ids WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn mark_assigned(
        pool: &PgPool,
        id: Uuid,
        holder_id: Uuid,
        holder_name: &str,
    ) -> DbResult<GeneratedId> {
        let record = sqlx::query_as::<_, GeneratedId>(
            "UPDATE generated_ids SET \
                 status = 'assigned', holder_id = $2, holder_name = $3, \
                 assigned_at = NOW(), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, code, kind, status, sequence, holder_id, holder_name, \
                       assigned_at, activated_at, deactivated_at, created_at, updated_at",
        )
        .bind(id)
        .bind(holder_id)
        .bind(holder_name)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    pub async fn mark_activated(pool: &PgPool, id: Uuid) -> DbResult<GeneratedId> {
        let record = sqlx::query_as::<_, GeneratedId>(
            "UPDATE generated_ids SET \
                 status = 'activated', activated_at = NOW(), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, code, kind, status, sequence, holder_id, holder_name, \
                       assigned_at, activated_at, deactivated_at, created_at, updated_at",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    pub async fn mark_deactivated(pool: &PgPool, id: Uuid) -> DbResult<GeneratedId> {
        let record = sqlx::query_as::<_, GeneratedId>(
            "UPDATE generated_ids SET \
                 status = 'deactivated', deactivated_at = NOW(), updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, code, kind, status, sequence, holder_id, holder_name, \
                       assigned_at, activated_at, deactivated_at, created_at, updated_at",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Returns a held code to the pool: holder and lifecycle timestamps are
    /// cleared so the code can be assigned again.
    pub async fn release(pool: &PgPool, id: Uuid) -> DbResult<GeneratedId> {
        let record = sqlx::query_as::<_, GeneratedId>(
            "UPDATE generated_ids SET \
                 status = 'available', holder_id = NULL, holder_name = NULL, \
                 assigned_at = NULL, activated_at = NULL, deactivated_at = NULL, \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, code, kind, status, sequence, holder_id, holder_name, \
                       assigned_at, activated_at, deactivated_at, created_at, updated_at",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }
}
