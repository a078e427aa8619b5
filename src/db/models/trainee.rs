use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

/// Shared by trainees, staff and resource persons. Trainees start `pending`
/// until an admin approves them; staff and resource persons are created
/// `active` by an admin. Nothing is ever deleted, only `deactivated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "person_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PersonStatus {
    Pending,
    Active,
    Deactivated,
}

impl PersonStatus {
    /// Wire-format name, as it appears in JSON and in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            PersonStatus::Pending => "pending",
            PersonStatus::Active => "active",
            PersonStatus::Deactivated => "deactivated",
        }
    }
}

impl fmt::Display for PersonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Trainee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub sponsor_id: Option<Uuid>,
    pub passport_url: Option<String>,
    /// Tag ID code held by this trainee, set at approval.
    pub tag_code: Option<String>,
    pub status: PersonStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewTrainee {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub sponsor_id: Option<Uuid>,
    pub passport_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTrainee {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub sponsor_id: Option<Uuid>,
    pub passport_url: Option<String>,
}

/// Admin approval payload. Leaving `tag_id` unset picks the first available
/// tag ID from the pool.
#[derive(Debug, Deserialize, Validate)]
pub struct ApproveTrainee {
    pub tag_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct TraineeFilter {
    pub status: Option<PersonStatus>,
    pub sponsor_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Error messages render statuses through Display, which must match the
    // casing clients send and receive.
    #[test]
    fn status_displays_in_wire_casing() {
        for status in [
            PersonStatus::Pending,
            PersonStatus::Active,
            PersonStatus::Deactivated,
        ] {
            assert_eq!(serde_json::to_value(status).unwrap(), status.to_string());
        }
    }
}
