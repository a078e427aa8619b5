use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "id_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IdKind {
    Tag,
    Staff,
    ResourcePerson,
}

impl IdKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            IdKind::Tag => "TAG",
            IdKind::Staff => "STF",
            IdKind::ResourcePerson => "RP",
        }
    }

    /// Renders the human-readable code for a sequence number, e.g. `TAG-0042`.
    pub fn format_code(&self, sequence: i32) -> String {
        format!("{}-{:04}", self.prefix(), sequence)
    }
}

/// Availability lifecycle of an issued ID:
///
/// `available -> assigned -> activated -> deactivated`, with `release`
/// returning any held ID to `available` (the code is reused by a future
/// holder; the code string itself is never re-minted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "id_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IdStatus {
    Available,
    Assigned,
    Activated,
    Deactivated,
}

impl IdStatus {
    /// The forward transition table. `release` is handled separately since it
    /// applies from every held state.
    pub fn can_transition_to(&self, next: IdStatus) -> bool {
        matches!(
            (self, next),
            (IdStatus::Available, IdStatus::Assigned)
                | (IdStatus::Assigned, IdStatus::Activated)
                | (IdStatus::Assigned, IdStatus::Deactivated)
                | (IdStatus::Activated, IdStatus::Deactivated)
        )
    }

    pub fn can_release(&self) -> bool {
        !matches!(self, IdStatus::Available)
    }

    /// Wire-format name, as it appears in JSON and in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            IdStatus::Available => "available",
            IdStatus::Assigned => "assigned",
            IdStatus::Activated => "activated",
            IdStatus::Deactivated => "deactivated",
        }
    }
}

impl fmt::Display for IdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct GeneratedId {
    pub id: Uuid,
    pub code: String,
    pub kind: IdKind,
    pub status: IdStatus,
    pub sequence: i32,
    pub holder_id: Option<Uuid>,
    pub holder_name: Option<String>,
    pub assigned_at: Option<OffsetDateTime>,
    pub activated_at: Option<OffsetDateTime>,
    pub deactivated_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateIds {
    pub kind: IdKind,
    #[validate(range(min = 1, max = 500))]
    pub count: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AssignId {
    pub holder_id: Uuid,
    #[validate(length(min = 1))]
    pub holder_name: String,
}

#[derive(Debug, Deserialize)]
pub struct IdFilter {
    pub kind: Option<IdKind>,
    pub status: Option<IdStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_prefixed_and_zero_padded() {
        assert_eq!(IdKind::Tag.format_code(42), "TAG-0042");
        assert_eq!(IdKind::Staff.format_code(7), "STF-0007");
        assert_eq!(IdKind::ResourcePerson.format_code(1234), "RP-1234");
        // sequences larger than the pad width keep growing
        assert_eq!(IdKind::Tag.format_code(12345), "TAG-12345");
    }

    #[test]
    fn transition_table_allows_the_forward_path() {
        assert!(IdStatus::Available.can_transition_to(IdStatus::Assigned));
        assert!(IdStatus::Assigned.can_transition_to(IdStatus::Activated));
        assert!(IdStatus::Assigned.can_transition_to(IdStatus::Deactivated));
        assert!(IdStatus::Activated.can_transition_to(IdStatus::Deactivated));
    }

    #[test]
    fn transition_table_rejects_everything_else() {
        let all = [
            IdStatus::Available,
            IdStatus::Assigned,
            IdStatus::Activated,
            IdStatus::Deactivated,
        ];
        let allowed = [
            (IdStatus::Available, IdStatus::Assigned),
            (IdStatus::Assigned, IdStatus::Activated),
            (IdStatus::Assigned, IdStatus::Deactivated),
            (IdStatus::Activated, IdStatus::Deactivated),
        ];

        for from in all {
            for to in all {
                let expected = allowed.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    expected,
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn release_applies_to_every_held_state() {
        assert!(!IdStatus::Available.can_release());
        assert!(IdStatus::Assigned.can_release());
        assert!(IdStatus::Activated.can_release());
        assert!(IdStatus::Deactivated.can_release());
    }

    #[test]
    fn wire_format_is_snake_case() {
        assert_eq!(
            serde_json::to_value(IdKind::ResourcePerson).unwrap(),
            "resource_person"
        );
        assert_eq!(serde_json::to_value(IdStatus::Available).unwrap(), "available");
    }

    // Error messages render statuses through Display, which must match the
    // casing clients send and receive.
    #[test]
    fn status_displays_in_wire_casing() {
        for status in [
            IdStatus::Available,
            IdStatus::Assigned,
            IdStatus::Activated,
            IdStatus::Deactivated,
        ] {
            assert_eq!(serde_json::to_value(status).unwrap(), status.to_string());
        }
    }
}
