use secrecy::SecretBox;
use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "admin_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Admin,
    SuperAdmin,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: AdminRole,
    pub is_active: bool,
    pub last_login_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewAdmin {
    #[validate(email)]
    pub email: String,
    pub password: SecretBox<String>,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub role: Option<AdminRole>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAdmin {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<AdminRole>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AdminLogin {
    #[validate(email)]
    pub email: String,
    pub password: SecretBox<String>,
}

/// Collection counts behind the admin dashboard tiles.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct DashboardCounts {
    pub trainees_total: i64,
    pub trainees_pending: i64,
    pub trainees_active: i64,
    pub staff_total: i64,
    pub resource_persons_total: i64,
    pub ids_available: i64,
    pub ids_assigned: i64,
    pub ids_activated: i64,
    pub ids_deactivated: i64,
    pub exams_total: i64,
    pub attempts_submitted: i64,
    pub announcements_total: i64,
    pub videos_total: i64,
    pub files_total: i64,
    pub certificates_total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let admin = Admin {
            id: Uuid::nil(),
            email: "ops@portal.test".into(),
            password_hash: "$2b$12$secret".into(),
            first_name: "Ada".into(),
            last_name: "Obi".into(),
            role: AdminRole::SuperAdmin,
            is_active: true,
            last_login_at: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };

        let json = serde_json::to_value(&admin).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "super_admin");
    }

    #[test]
    fn new_admin_requires_valid_email() {
        let payload: NewAdmin = serde_json::from_value(serde_json::json!({
            "email": "not-an-email",
            "password": "hunter2",
            "first_name": "Ada",
            "last_name": "Obi",
        }))
        .unwrap();

        assert!(validator::Validate::validate(&payload).is_err());
    }
}
