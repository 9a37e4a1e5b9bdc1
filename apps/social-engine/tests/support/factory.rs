//! Direct row writers for tables the engine only reads, and for planting
//! damaged payloads.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};
use social_engine::entities::trust_contracts::ContractStatus;
use social_engine::entities::{
    interaction_history, romance_notifications, romance_relationships, social_capital,
    trust_contracts,
};
use social_engine::DomainError;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

pub async fn seed_social_capital<C: ConnectionTrait>(
    conn: &C,
    player_id: Uuid,
    capital_score: f64,
) -> Result<(), DomainError> {
    social_capital::ActiveModel {
        player_id: Set(player_id),
        capital_score: Set(capital_score),
        positive_actions: Set(4),
        negative_actions: Set(1),
        updated_at: Set(OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await?;
    Ok(())
}

/// `count` interactions, one second apart, the last one newest.
pub async fn seed_interactions<C: ConnectionTrait>(
    conn: &C,
    player_id: Uuid,
    count: i64,
) -> Result<(), DomainError> {
    let start = OffsetDateTime::now_utc() - Duration::seconds(count);
    for i in 0..count {
        interaction_history::ActiveModel {
            id: Set(Uuid::new_v4()),
            player_id: Set(player_id),
            target_id: Set(Uuid::new_v4()),
            interaction_type: Set("trade".to_string()),
            description: Set(format!("interaction #{i}")),
            created_at: Set(start + Duration::seconds(i)),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

pub async fn seed_romance_notification<C: ConnectionTrait>(
    conn: &C,
    player_id: Uuid,
    message: &str,
    metadata: &str,
    created_at: OffsetDateTime,
) -> Result<Uuid, DomainError> {
    let id = Uuid::new_v4();
    romance_notifications::ActiveModel {
        id: Set(id),
        player_id: Set(player_id),
        notification_type: Set("romance_request".to_string()),
        relationship_id: Set(None),
        message: Set(message.to_string()),
        is_read: Set(false),
        metadata: Set(metadata.to_string()),
        created_at: Set(created_at),
    }
    .insert(conn)
    .await?;
    Ok(id)
}

/// Contract row whose terms are not valid JSON.
pub async fn seed_contract_with_raw_terms<C: ConnectionTrait>(
    conn: &C,
    player_id: Uuid,
    target_id: Uuid,
    raw_terms: &str,
) -> Result<Uuid, DomainError> {
    let id = Uuid::new_v4();
    trust_contracts::ActiveModel {
        id: Set(id),
        player_id: Set(player_id),
        target_id: Set(target_id),
        terms: Set(raw_terms.to_string()),
        status: Set(ContractStatus::Active),
        created_at: Set(OffsetDateTime::now_utc()),
        expires_at: Set(None),
        terminated_at: Set(None),
    }
    .insert(conn)
    .await?;
    Ok(id)
}

/// Overwrite the stored flags/metadata text of a romance.
pub async fn overwrite_romance_payloads<C: ConnectionTrait>(
    conn: &C,
    romance_id: Uuid,
    flags: &str,
    metadata: &str,
) -> Result<(), DomainError> {
    let row = romance_relationships::Entity::find_by_id(romance_id)
        .one(conn)
        .await?
        .expect("romance row to overwrite");
    let mut active: romance_relationships::ActiveModel = row.into();
    active.flags = Set(flags.to_string());
    active.metadata = Set(metadata.to_string());
    active.update(conn).await?;
    Ok(())
}
