use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{InboxQuery, Message, NewMessage};
use crate::db::DbResult;

pub struct MessageRepository;

impl MessageRepository {
    pub async fn create(pool: &PgPool, new_message: &NewMessage) -> DbResult<Message> {
        let message = sqlx::query_as::<_, Message>(
            "INSERT INTO messages (trainee_id, resource_person_id, sender, body) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, trainee_id, resource_person_id, sender, body, is_read, sent_at",
        )
        .bind(new_message.trainee_id)
        .bind(new_message.resource_person_id)
        .bind(new_message.sender)
        .bind(&new_message.body)
        .fetch_one(pool)
        .await?;

        Ok(message)
    }

    /// Full thread between one trainee and one resource person, in send order.
    pub async fn conversation(
        pool: &PgPool,
        trainee_id: Uuid,
        resource_person_id: Uuid,
    ) -> DbResult<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT id, trainee_id, resource_person_id, sender, body, is_read, sent_at \
             FROM messages \
             WHERE trainee_id = $1 AND resource_person_id = $2 \
             ORDER BY sent_at",
        )
        .bind(trainee_id)
        .bind(resource_person_id)
        .fetch_all(pool)
        .await?;

        Ok(messages)
    }

    /// Inbox view for one party: the latest message of each of their
    /// conversations, most recent conversation first.
    pub async fn inbox(pool: &PgPool, query: &InboxQuery) -> DbResult<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            "SELECT id, trainee_id, resource_person_id, sender, body, is_read, sent_at \
             FROM (SELECT DISTINCT ON (trainee_id, resource_person_id) \
                          id, trainee_id, resource_person_id, sender, body, is_read, sent_at \
                   FROM messages \
                   WHERE ($1::uuid IS NULL OR trainee_id = $1) \
                     AND ($2::uuid IS NULL OR resource_person_id = $2) \
                   ORDER BY trainee_id, resource_person_id, sent_at DESC) latest \
             ORDER BY sent_at DESC",
        )
        .bind(query.trainee_id)
        .bind(query.resource_person_id)
        .fetch_all(pool)
        .await?;

        Ok(messages)
    }

    pub async fn mark_read(pool: &PgPool, id: Uuid) -> DbResult<Message> {
        let message = sqlx::query_as::<_, Message>(
            "UPDATE messages SET is_read = TRUE \
             WHERE id = $1 \
             RETURNING id, trainee_id, resource_person_id, sender, body, is_read, sent_at",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(message)
    }
}
