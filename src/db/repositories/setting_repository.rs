use sqlx::PgPool;

use crate::db::models::{NewPortalSetting, PortalSetting, UpsertPortalSetting};
use crate::db::DbResult;

pub struct SettingRepository;

impl SettingRepository {
    pub async fn create(pool: &PgPool, new_setting: &NewPortalSetting) -> DbResult<PortalSetting> {
        let setting = sqlx::query_as::<_, PortalSetting>(
            "INSERT INTO portal_settings (setting_key, setting_value, description) \
             VALUES ($1, $2, $3) \
             RETURNING id, setting_key, setting_value, description, created_at, updated_at",
        )
        .bind(&new_setting.setting_key)
        .bind(&new_setting.setting_value)
        .bind(&new_setting.description)
        .fetch_one(pool)
        .await?;

        Ok(setting)
    }

    pub async fn get_by_key(pool: &PgPool, key: &str) -> DbResult<Option<PortalSetting>> {
        let setting = sqlx::query_as::<_, PortalSetting>(
            "SELECT id, setting_key, setting_value, description, created_at, updated_at \
             FROM portal_settings WHERE setting_key = $1",
        )
        .bind(key)
        .fetch_optional(pool)
        .await?;

        Ok(setting)
    }

    pub async fn list(pool: &PgPool) -> DbResult<Vec<PortalSetting>> {
        let settings = sqlx::query_as::<_, PortalSetting>(
            "SELECT id, setting_key, setting_value, description, created_at, updated_at \
             FROM portal_settings ORDER BY setting_key",
        )
        .fetch_all(pool)
        .await?;

        Ok(settings)
    }

    pub async fn upsert(
        pool: &PgPool,
        key: &str,
        upsert: &UpsertPortalSetting,
    ) -> DbResult<PortalSetting> {
        let setting = sqlx::query_as::<_, PortalSetting>(
            "INSERT INTO portal_settings (setting_key, setting_value, description) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (setting_key) DO UPDATE SET \
                 setting_value = EXCLUDED.setting_value, \
                 description = COALESCE(EXCLUDED.description, portal_settings.description), \
                 updated_at = NOW() \
             RETURNING id, setting_key, setting_value, description, created_at, updated_at",
        )
        .bind(key)
        .bind(&upsert.setting_value)
        .bind(&upsert.description)
        .fetch_one(pool)
        .await?;

        Ok(setting)
    }
}
