use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

// The bytes of videos and files live in the hosted object store; these
// records only carry the metadata the portal lists and scopes.

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub storage_url: String,
    pub duration_seconds: Option<i32>,
    pub sponsor_id: Option<Uuid>,
    pub uploaded_by: Option<Uuid>,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: Uuid,
    pub title: String,
    pub file_name: String,
    pub mime_type: Option<String>,
    pub size_bytes: Option<i64>,
    pub storage_url: String,
    pub sponsor_id: Option<Uuid>,
    pub uploaded_by: Option<Uuid>,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewVideo {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[validate(url)]
    pub storage_url: String,
    pub duration_seconds: Option<i32>,
    pub sponsor_id: Option<Uuid>,
    pub uploaded_by: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVideo {
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(url)]
    pub storage_url: Option<String>,
    pub duration_seconds: Option<i32>,
    pub sponsor_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewStoredFile {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub file_name: String,
    pub mime_type: Option<String>,
    pub size_bytes: Option<i64>,
    #[validate(url)]
    pub storage_url: String,
    pub sponsor_id: Option<Uuid>,
    pub uploaded_by: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStoredFile {
    pub title: Option<String>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub size_bytes: Option<i64>,
    #[validate(url)]
    pub storage_url: Option<String>,
    pub sponsor_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

/// Listing filter shared by videos and files. A sponsor-scoped listing
/// returns that sponsor's items plus unscoped (global) ones.
#[derive(Debug, Deserialize)]
pub struct ContentFilter {
    pub sponsor_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_url_must_be_a_url() {
        let payload: NewVideo = serde_json::from_value(serde_json::json!({
            "title": "Safety induction",
            "storage_url": "not a url",
        }))
        .unwrap();

        assert!(payload.validate().is_err());

        let payload: NewVideo = serde_json::from_value(serde_json::json!({
            "title": "Safety induction",
            "storage_url": "https://cdn.example.org/v/induction.mp4",
        }))
        .unwrap();

        assert!(payload.validate().is_ok());
    }
}
