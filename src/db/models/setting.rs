use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

/// Key/value portal settings (registration window, default pass mark,
/// frontend feature flags). Values are free-form JSON; the server does not
/// interpret them.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct PortalSetting {
    pub id: Uuid,
    pub setting_key: String,
    pub setting_value: serde_json::Value,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewPortalSetting {
    #[validate(length(min = 1))]
    pub setting_key: String,
    pub setting_value: serde_json::Value,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpsertPortalSetting {
    pub setting_value: serde_json::Value,
    pub description: Option<String>,
}
