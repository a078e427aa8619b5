use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{NewSponsor, Sponsor, SponsorFilter, UpdateSponsor};
use crate::db::DbResult;

pub struct SponsorRepository;

impl SponsorRepository {
    pub async fn create(pool: &PgPool, new_sponsor: &NewSponsor) -> DbResult<Sponsor> {
        let sponsor = sqlx::query_as::<_, Sponsor>(
            "INSERT INTO sponsors (name, contact_email, contact_phone) \
             VALUES ($1, $2, $3) \
             RETURNING id, name, contact_email, contact_phone, is_active, created_at, updated_at",
        )
        .bind(&new_sponsor.name)
        .bind(&new_sponsor.contact_email)
        .bind(&new_sponsor.contact_phone)
        .fetch_one(pool)
        .await?;

        Ok(sponsor)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> DbResult<Option<Sponsor>> {
        let sponsor = sqlx::query_as::<_, Sponsor>(
            "SELECT id, name, contact_email, contact_phone, is_active, created_at, updated_at \
             FROM sponsors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(sponsor)
    }

    pub async fn list(pool: &PgPool, filter: &SponsorFilter) -> DbResult<Vec<Sponsor>> {
        let sponsors = sqlx::query_as::<_, Sponsor>(
            "SELECT id, name, contact_email, contact_phone, is_active, created_at, updated_at \
             FROM sponsors \
             WHERE ($1::boolean IS NULL OR is_active = $1) \
             ORDER BY name",
        )
        .bind(filter.is_active)
        .fetch_all(pool)
        .await?;

        Ok(sponsors)
    }

    pub async fn update(pool: &PgPool, id: Uuid, update: &UpdateSponsor) -> DbResult<Sponsor> {
        let sponsor = sqlx::query_as::<_, Sponsor>(
            "UPDATE sponsors SET \
                 name = COALESCE($2, name), \
                 contact_email = COALESCE($3, contact_email), \
                 contact_phone = COALESCE($4, contact_phone), \
                 is_active = COALESCE($5, is_active), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, name, contact_email, contact_phone, is_active, created_at, updated_at",
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.contact_email)
        .bind(&update.contact_phone)
        .bind(update.is_active)
        .fetch_one(pool)
        .await?;

        Ok(sponsor)
    }
}
