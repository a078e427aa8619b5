use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "message_sender", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MessageSender {
    Trainee,
    ResourcePerson,
}

/// One direct message between a trainee and a resource person.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub trainee_id: Uuid,
    pub resource_person_id: Uuid,
    pub sender: MessageSender,
    pub body: String,
    pub is_read: bool,
    pub sent_at: OffsetDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewMessage {
    pub trainee_id: Uuid,
    pub resource_person_id: Uuid,
    pub sender: MessageSender,
    #[validate(length(min = 1))]
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    pub trainee_id: Uuid,
    pub resource_person_id: Uuid,
}

/// One side of an inbox listing: either all conversations of a trainee or of
/// a resource person.
#[derive(Debug, Deserialize)]
pub struct InboxQuery {
    pub trainee_id: Option<Uuid>,
    pub resource_person_id: Option<Uuid>,
}
