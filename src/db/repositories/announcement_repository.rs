use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{
    Announcement, AnnouncementReply, NewAnnouncement, NewAnnouncementReply, UpdateAnnouncement,
};
use crate::db::DbResult;

pub struct AnnouncementRepository;

impl AnnouncementRepository {
    pub async fn create(pool: &PgPool, new_announcement: &NewAnnouncement) -> DbResult<Announcement> {
        let announcement = sqlx::query_as::<_, Announcement>(
            "INSERT INTO announcements (title, body, audience, sponsor_id, posted_by) \
             VALUES ($1, $2, COALESCE($3::announcement_audience, 'all'), $4, $5) \
             RETURNING id, title, body, audience, sponsor_id, posted_by, is_active, \
                       created_at, updated_at",
        )
        .bind(&new_announcement.title)
        .bind(&new_announcement.body)
        .bind(new_announcement.audience)
        .bind(new_announcement.sponsor_id)
        .bind(new_announcement.posted_by)
        .fetch_one(pool)
        .await?;

        Ok(announcement)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> DbResult<Option<Announcement>> {
        let announcement = sqlx::query_as::<_, Announcement>(
            "SELECT id, title, body, audience, sponsor_id, posted_by, is_active, \
                    created_at, updated_at \
             FROM announcements WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(announcement)
    }

    /// Returns every announcement, newest first. Audience and sponsor
    /// visibility are applied by the caller at read time.
    pub async fn list(pool: &PgPool) -> DbResult<Vec<Announcement>> {
        let announcements = sqlx::query_as::<_, Announcement>(
            "SELECT id, title, body, audience, sponsor_id, posted_by, is_active, \
                    created_at, updated_at \
             FROM announcements ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await?;

        Ok(announcements)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        update: &UpdateAnnouncement,
    ) -> DbResult<Announcement> {
        let announcement = sqlx::query_as::<_, Announcement>(
            "UPDATE announcements SET \
                 title = COALESCE($2, title), \
                 body = COALESCE($3, body), \
                 audience = COALESCE($4::announcement_audience, audience), \
                 sponsor_id = COALESCE($5, sponsor_id), \
                 is_active = COALESCE($6, is_active), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, title, body, audience, sponsor_id, posted_by, is_active, \
                       created_at, updated_at",
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.body)
        .bind(update.audience)
        .bind(update.sponsor_id)
        .bind(update.is_active)
        .fetch_one(pool)
        .await?;

        Ok(announcement)
    }

    pub async fn deactivate(pool: &PgPool, id: Uuid) -> DbResult<Announcement> {
        let announcement = sqlx::query_as::<_, Announcement>(
            "UPDATE announcements SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, title, body, audience, sponsor_id, posted_by, is_active, \
                       created_at, updated_at",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(announcement)
    }

    pub async fn add_reply(
        pool: &PgPool,
        announcement_id: Uuid,
        new_reply: &NewAnnouncementReply,
    ) -> DbResult<AnnouncementReply> {
        let reply = sqlx::query_as::<_, AnnouncementReply>(
            "INSERT INTO announcement_replies (announcement_id, author_name, author_role, body) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, announcement_id, author_name, author_role, body, created_at",
        )
        .bind(announcement_id)
        .bind(&new_reply.author_name)
        .bind(new_reply.author_role)
        .bind(&new_reply.body)
        .fetch_one(pool)
        .await?;

        Ok(reply)
    }

    pub async fn list_replies(
        pool: &PgPool,
        announcement_id: Uuid,
    ) -> DbResult<Vec<AnnouncementReply>> {
        let replies = sqlx::query_as::<_, AnnouncementReply>(
            "SELECT id, announcement_id, author_name, author_role, body, created_at \
             FROM announcement_replies WHERE announcement_id = $1 \
             ORDER BY created_at",
        )
        .bind(announcement_id)
        .fetch_all(pool)
        .await?;

        Ok(replies)
    }
}
