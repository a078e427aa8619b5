use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{
    ContentFilter, NewStoredFile, NewVideo, StoredFile, UpdateStoredFile, UpdateVideo, Video,
};
use crate::db::DbResult;

// Sponsor-scoped listings return the sponsor's items plus unscoped (global)
// ones, so the same queries serve both the admin console and a sponsor view.

pub struct ContentRepository;

impl ContentRepository {
    pub async fn create_video(pool: &PgPool, new_video: &NewVideo) -> DbResult<Video> {
        let video = sqlx::query_as::<_, Video>(
            "INSERT INTO videos \
                 (title, description, storage_url, duration_seconds, sponsor_id, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, title, description, storage_url, duration_seconds, sponsor_id, \
                       uploaded_by, is_active, created_at, updated_at",
        )
        .bind(&new_video.title)
        .bind(&new_video.description)
        .bind(&new_video.storage_url)
        .bind(new_video.duration_seconds)
        .bind(new_video.sponsor_id)
        .bind(new_video.uploaded_by)
        .fetch_one(pool)
        .await?;

        Ok(video)
    }

    pub async fn get_video(pool: &PgPool, id: Uuid) -> DbResult<Option<Video>> {
        let video = sqlx::query_as::<_, Video>(
            "SELECT id, title, description, storage_url, duration_seconds, sponsor_id, \
                    uploaded_by, is_active, created_at, updated_at \
             FROM videos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(video)
    }

    pub async fn list_videos(pool: &PgPool, filter: &ContentFilter) -> DbResult<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(
            "SELECT id, title, description, storage_url, duration_seconds, sponsor_id, \
                    uploaded_by, is_active, created_at, updated_at \
             FROM videos \
             WHERE ($1::uuid IS NULL OR sponsor_id = $1 OR sponsor_id IS NULL) \
               AND ($2::boolean IS NULL OR is_active = $2) \
             ORDER BY created_at DESC",
        )
        .bind(filter.sponsor_id)
        .bind(filter.is_active)
        .fetch_all(pool)
        .await?;

        Ok(videos)
    }

    pub async fn update_video(pool: &PgPool, id: Uuid, update: &UpdateVideo) -> DbResult<Video> {
        let video = sqlx::query_as::<_, Video>(
            "UPDATE videos SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 storage_url = COALESCE($4, storage_url), \
                 duration_seconds = COALESCE($5, duration_seconds), \
                 sponsor_id = COALESCE($6, sponsor_id), \
                 is_active = COALESCE($7, is_active), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, title, description, storage_url, duration_seconds, sponsor_id, \
                       uploaded_by, is_active, created_at, updated_at",
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .bind(&update.storage_url)
        .bind(update.duration_seconds)
        .bind(update.sponsor_id)
        .bind(update.is_active)
        .fetch_one(pool)
        .await?;

        Ok(video)
    }

    pub async fn deactivate_video(pool: &PgPool, id: Uuid) -> DbResult<Video> {
        let video = sqlx::query_as::<_, Video>(
            "UPDATE videos SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, title, description, storage_url, duration_seconds, sponsor_id, \
                       uploaded_by, is_active, created_at, updated_at",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(video)
    }

    pub async fn create_file(pool: &PgPool, new_file: &NewStoredFile) -> DbResult<StoredFile> {
        let file = sqlx::query_as::<_, StoredFile>(
            "INSERT INTO files \
                 (title, file_name, mime_type, size_bytes, storage_url, sponsor_id, uploaded_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, title, file_name, mime_type, size_bytes, storage_url, sponsor_id, \
                       uploaded_by, is_active, created_at, updated_at",
        )
        .bind(&new_file.title)
        .bind(&new_file.file_name)
        .bind(&new_file.mime_type)
        .bind(new_file.size_bytes)
        .bind(&new_file.storage_url)
        .bind(new_file.sponsor_id)
        .bind(new_file.uploaded_by)
        .fetch_one(pool)
        .await?;

        Ok(file)
    }

    pub async fn get_file(pool: &PgPool, id: Uuid) -> DbResult<Option<StoredFile>> {
        let file = sqlx::query_as::<_, StoredFile>(
            "SELECT id, title, file_name, mime_type, size_bytes, storage_url, sponsor_id, \
                    uploaded_by, is_active, created_at, updated_at \
             FROM files WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(file)
    }

    pub async fn list_files(pool: &PgPool, filter: &ContentFilter) -> DbResult<Vec<StoredFile>> {
        let files = sqlx::query_as::<_, StoredFile>(
            "SELECT id, title, file_name, mime_type, size_bytes, storage_url, sponsor_id, \
                    uploaded_by, is_active, created_at, updated_at \
             FROM files \
             WHERE ($1::uuid IS NULL OR sponsor_id = $1 OR sponsor_id IS NULL) \
               AND ($2::boolean IS NULL OR is_active = $2) \
             ORDER BY created_at DESC",
        )
        .bind(filter.sponsor_id)
        .bind(filter.is_active)
        .fetch_all(pool)
        .await?;

        Ok(files)
    }

    pub async fn update_file(
        pool: &PgPool,
        id: Uuid,
        update: &UpdateStoredFile,
    ) -> DbResult<StoredFile> {
        let file = sqlx::query_as::<_, StoredFile>(
            "UPDATE files SET \
                 title = COALESCE($2, title), \
                 file_name = COALESCE($3, file_name), \
                 mime_type = COALESCE($4, mime_type), \
                 size_bytes = COALESCE($5, size_bytes), \
                 storage_url = COALESCE($6, storage_url), \
                 sponsor_id = COALESCE($7, sponsor_id), \
                 is_active = COALESCE($8, is_active), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, title, file_name, mime_type, size_bytes, storage_url, sponsor_id, \
                       uploaded_by, is_active, created_at, updated_at",
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.file_name)
        .bind(&update.mime_type)
        .bind(update.size_bytes)
        .bind(&update.storage_url)
        .bind(update.sponsor_id)
        .bind(update.is_active)
        .fetch_one(pool)
        .await?;

        Ok(file)
    }

    pub async fn deactivate_file(pool: &PgPool, id: Uuid) -> DbResult<StoredFile> {
        let file = sqlx::query_as::<_, StoredFile>(
            "UPDATE files SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, title, file_name, mime_type, size_bytes, storage_url, sponsor_id, \
                       uploaded_by, is_active, created_at, updated_at",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(file)
    }
}
