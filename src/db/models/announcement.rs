use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "announcement_audience", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AnnouncementAudience {
    All,
    Trainees,
    Staff,
    ResourcePersons,
}

/// Role of the author of a reply, as the portal records actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "actor_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Admin,
    Trainee,
    Staff,
    ResourcePerson,
}

impl AnnouncementAudience {
    /// Whether an announcement posted to this audience reaches the given role.
    /// Admins see everything.
    pub fn reaches(&self, role: ActorRole) -> bool {
        match role {
            ActorRole::Admin => true,
            ActorRole::Trainee => matches!(self, Self::All | Self::Trainees),
            ActorRole::Staff => matches!(self, Self::All | Self::Staff),
            ActorRole::ResourcePerson => matches!(self, Self::All | Self::ResourcePersons),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub audience: AnnouncementAudience,
    /// Scopes the announcement to one sponsor's trainees; `None` is global.
    pub sponsor_id: Option<Uuid>,
    pub posted_by: Option<Uuid>,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Announcement {
    /// Read-time visibility check: audience must reach the role and, when the
    /// announcement is sponsor-scoped, the reader must belong to that sponsor.
    pub fn visible_to(&self, role: ActorRole, sponsor_id: Option<Uuid>) -> bool {
        if !self.is_active || !self.audience.reaches(role) {
            return false;
        }
        match self.sponsor_id {
            None => true,
            Some(scope) => role == ActorRole::Admin || sponsor_id == Some(scope),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AnnouncementReply {
    pub id: Uuid,
    pub announcement_id: Uuid,
    pub author_name: String,
    pub author_role: ActorRole,
    pub body: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewAnnouncement {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
    pub audience: Option<AnnouncementAudience>,
    pub sponsor_id: Option<Uuid>,
    pub posted_by: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAnnouncement {
    pub title: Option<String>,
    pub body: Option<String>,
    pub audience: Option<AnnouncementAudience>,
    pub sponsor_id: Option<Uuid>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewAnnouncementReply {
    #[validate(length(min = 1))]
    pub author_name: String,
    pub author_role: ActorRole,
    #[validate(length(min = 1))]
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct AnnouncementFilter {
    pub audience: Option<ActorRole>,
    pub sponsor_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn announcement(audience: AnnouncementAudience, sponsor: Option<Uuid>) -> Announcement {
        Announcement {
            id: Uuid::nil(),
            title: "Orientation".into(),
            body: "Monday, 9am".into(),
            audience,
            sponsor_id: sponsor,
            posted_by: None,
            is_active: true,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn audience_reaches_matching_roles() {
        assert!(AnnouncementAudience::All.reaches(ActorRole::Trainee));
        assert!(AnnouncementAudience::Trainees.reaches(ActorRole::Trainee));
        assert!(!AnnouncementAudience::Staff.reaches(ActorRole::Trainee));
        assert!(AnnouncementAudience::ResourcePersons.reaches(ActorRole::ResourcePerson));
        // admins read everything
        assert!(AnnouncementAudience::Trainees.reaches(ActorRole::Admin));
    }

    #[test]
    fn sponsor_scoping_limits_visibility() {
        let scope = Uuid::from_u128(7);
        let scoped = announcement(AnnouncementAudience::Trainees, Some(scope));

        assert!(scoped.visible_to(ActorRole::Trainee, Some(scope)));
        assert!(!scoped.visible_to(ActorRole::Trainee, Some(Uuid::from_u128(8))));
        assert!(!scoped.visible_to(ActorRole::Trainee, None));
        assert!(scoped.visible_to(ActorRole::Admin, None));

        let global = announcement(AnnouncementAudience::Trainees, None);
        assert!(global.visible_to(ActorRole::Trainee, None));
    }

    #[test]
    fn inactive_announcements_are_invisible() {
        let mut a = announcement(AnnouncementAudience::All, None);
        a.is_active = false;
        assert!(!a.visible_to(ActorRole::Trainee, None));
        assert!(!a.visible_to(ActorRole::Admin, None));
    }
}
