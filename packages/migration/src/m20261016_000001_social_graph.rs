use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Relationships {
    Table,
    Id,
    PlayerId,
    TargetId,
    RelationshipType,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum TrustLevels {
    Table,
    PlayerId,
    TargetId,
    Level,
    Experience,
    UpdatedAt,
}

#[derive(Iden)]
enum TrustContracts {
    Table,
    Id,
    PlayerId,
    TargetId,
    Terms,
    Status,
    CreatedAt,
    ExpiresAt,
    TerminatedAt,
}

#[derive(Iden)]
enum Alliances {
    Table,
    Id,
    Name,
    LeaderId,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
    TerminatedAt,
}

#[derive(Iden)]
enum AllianceMembers {
    Table,
    AllianceId,
    PlayerId,
    Role,
    JoinedAt,
}

#[derive(Iden)]
enum AllianceInvitations {
    Table,
    Id,
    AllianceId,
    InviterId,
    PlayerId,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum PlayerRatings {
    Table,
    PlayerId,
    RaterId,
    Rating,
    Comment,
    UpdatedAt,
}

#[derive(Iden)]
enum SocialCapital {
    Table,
    PlayerId,
    CapitalScore,
    PositiveActions,
    NegativeActions,
    UpdatedAt,
}

#[derive(Iden)]
enum InteractionHistory {
    Table,
    Id,
    PlayerId,
    TargetId,
    InteractionType,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum ArbitrationCases {
    Table,
    Id,
    RequesterId,
    TargetId,
    Issue,
    Status,
    CreatedAt,
    ResolvedAt,
}

#[derive(Iden)]
enum RomanceRelationships {
    Table,
    Id,
    RomanceType,
    PlayerId,
    TargetId,
    PairLow,
    PairHigh,
    ActivePairKey,
    RelationshipScore,
    ChemistryScore,
    TrustScore,
    PhysicalIntimacy,
    EmotionalIntimacy,
    RelationshipStage,
    IsActive,
    IsRomantic,
    IsPublic,
    ConsentStatus,
    RelationshipHealth,
    Flags,
    Metadata,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum RomancePrivacySettings {
    Table,
    PlayerId,
    RomanceType,
    ShowRelationshipStatus,
    ShowRomanceEvents,
    AllowRomanceRequests,
    UpdatedAt,
}

#[derive(Iden)]
enum RomanceNotifications {
    Table,
    Id,
    PlayerId,
    NotificationType,
    RelationshipId,
    Message,
    IsRead,
    Metadata,
    CreatedAt,
}

#[derive(Iden)]
enum NotificationPreferences {
    Table,
    PlayerId,
    RomanceUpdates,
    AllianceUpdates,
    TrustUpdates,
    RatingUpdates,
    UpdatedAt,
}

fn ts<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

fn ts_null<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).timestamp_with_time_zone().null().to_owned()
}

fn uuid_pk<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).uuid().not_null().primary_key().to_owned()
}

fn uuid_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).uuid().not_null().to_owned()
}

fn tag<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).string_len(32).not_null().to_owned()
}

fn flag<T: IntoIden>(col: T, default: bool) -> ColumnDef {
    ColumnDef::new(col)
        .boolean()
        .not_null()
        .default(default)
        .to_owned()
}

fn score<T: IntoIden>(col: T, default: i32) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .default(default)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // relationships
        manager
            .create_table(
                Table::create()
                    .table(Relationships::Table)
                    .if_not_exists()
                    .col(uuid_pk(Relationships::Id))
                    .col(uuid_col(Relationships::PlayerId))
                    .col(uuid_col(Relationships::TargetId))
                    .col(tag(Relationships::RelationshipType))
                    .col(ts(Relationships::CreatedAt))
                    .col(ts(Relationships::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_relationships_player_target")
                    .table(Relationships::Table)
                    .col(Relationships::PlayerId)
                    .col(Relationships::TargetId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_relationships_player_updated")
                    .table(Relationships::Table)
                    .col(Relationships::PlayerId)
                    .col(Relationships::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        // trust_levels: one row per ordered pair
        manager
            .create_table(
                Table::create()
                    .table(TrustLevels::Table)
                    .if_not_exists()
                    .col(uuid_col(TrustLevels::PlayerId))
                    .col(uuid_col(TrustLevels::TargetId))
                    .col(score(TrustLevels::Level, 50))
                    .col(
                        ColumnDef::new(TrustLevels::Experience)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ts(TrustLevels::UpdatedAt))
                    .primary_key(
                        Index::create()
                            .col(TrustLevels::PlayerId)
                            .col(TrustLevels::TargetId),
                    )
                    .to_owned(),
            )
            .await?;

        // trust_contracts
        manager
            .create_table(
                Table::create()
                    .table(TrustContracts::Table)
                    .if_not_exists()
                    .col(uuid_pk(TrustContracts::Id))
                    .col(uuid_col(TrustContracts::PlayerId))
                    .col(uuid_col(TrustContracts::TargetId))
                    .col(ColumnDef::new(TrustContracts::Terms).text().not_null())
                    .col(tag(TrustContracts::Status))
                    .col(ts(TrustContracts::CreatedAt))
                    .col(ts_null(TrustContracts::ExpiresAt))
                    .col(ts_null(TrustContracts::TerminatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_trust_contracts_player")
                    .table(TrustContracts::Table)
                    .col(TrustContracts::PlayerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_trust_contracts_target")
                    .table(TrustContracts::Table)
                    .col(TrustContracts::TargetId)
                    .to_owned(),
            )
            .await?;

        // alliances
        manager
            .create_table(
                Table::create()
                    .table(Alliances::Table)
                    .if_not_exists()
                    .col(uuid_pk(Alliances::Id))
                    .col(ColumnDef::new(Alliances::Name).string().not_null())
                    .col(uuid_col(Alliances::LeaderId))
                    .col(
                        ColumnDef::new(Alliances::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(tag(Alliances::Status))
                    .col(ts(Alliances::CreatedAt))
                    .col(ts(Alliances::UpdatedAt))
                    .col(ts_null(Alliances::TerminatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_alliances_status_created")
                    .table(Alliances::Table)
                    .col(Alliances::Status)
                    .col(Alliances::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // alliance_members: membership set keyed by (alliance, player)
        manager
            .create_table(
                Table::create()
                    .table(AllianceMembers::Table)
                    .if_not_exists()
                    .col(uuid_col(AllianceMembers::AllianceId))
                    .col(uuid_col(AllianceMembers::PlayerId))
                    .col(tag(AllianceMembers::Role))
                    .col(ts(AllianceMembers::JoinedAt))
                    .primary_key(
                        Index::create()
                            .col(AllianceMembers::AllianceId)
                            .col(AllianceMembers::PlayerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_alliance_members_alliance_id")
                            .from(AllianceMembers::Table, AllianceMembers::AllianceId)
                            .to(Alliances::Table, Alliances::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // alliance_invitations
        manager
            .create_table(
                Table::create()
                    .table(AllianceInvitations::Table)
                    .if_not_exists()
                    .col(uuid_pk(AllianceInvitations::Id))
                    .col(uuid_col(AllianceInvitations::AllianceId))
                    .col(uuid_col(AllianceInvitations::InviterId))
                    .col(uuid_col(AllianceInvitations::PlayerId))
                    .col(tag(AllianceInvitations::Status))
                    .col(ts(AllianceInvitations::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_alliance_invitations_alliance_id")
                            .from(AllianceInvitations::Table, AllianceInvitations::AllianceId)
                            .to(Alliances::Table, Alliances::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // player_ratings: one live rating per (target, rater)
        manager
            .create_table(
                Table::create()
                    .table(PlayerRatings::Table)
                    .if_not_exists()
                    .col(uuid_col(PlayerRatings::PlayerId))
                    .col(uuid_col(PlayerRatings::RaterId))
                    .col(ColumnDef::new(PlayerRatings::Rating).integer().not_null())
                    .col(
                        ColumnDef::new(PlayerRatings::Comment)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ts(PlayerRatings::UpdatedAt))
                    .primary_key(
                        Index::create()
                            .col(PlayerRatings::PlayerId)
                            .col(PlayerRatings::RaterId),
                    )
                    .to_owned(),
            )
            .await?;

        // social_capital (populated outside the engine)
        manager
            .create_table(
                Table::create()
                    .table(SocialCapital::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SocialCapital::PlayerId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SocialCapital::CapitalScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(SocialCapital::PositiveActions)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SocialCapital::NegativeActions)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ts(SocialCapital::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // interaction_history (append-only, written outside the engine)
        manager
            .create_table(
                Table::create()
                    .table(InteractionHistory::Table)
                    .if_not_exists()
                    .col(uuid_pk(InteractionHistory::Id))
                    .col(uuid_col(InteractionHistory::PlayerId))
                    .col(uuid_col(InteractionHistory::TargetId))
                    .col(tag(InteractionHistory::InteractionType))
                    .col(
                        ColumnDef::new(InteractionHistory::Description)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ts(InteractionHistory::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_interaction_history_player_created")
                    .table(InteractionHistory::Table)
                    .col(InteractionHistory::PlayerId)
                    .col(InteractionHistory::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // arbitration_cases
        manager
            .create_table(
                Table::create()
                    .table(ArbitrationCases::Table)
                    .if_not_exists()
                    .col(uuid_pk(ArbitrationCases::Id))
                    .col(uuid_col(ArbitrationCases::RequesterId))
                    .col(uuid_col(ArbitrationCases::TargetId))
                    .col(ColumnDef::new(ArbitrationCases::Issue).text().not_null())
                    .col(tag(ArbitrationCases::Status))
                    .col(ts(ArbitrationCases::CreatedAt))
                    .col(ts_null(ArbitrationCases::ResolvedAt))
                    .to_owned(),
            )
            .await?;

        // romance_relationships
        manager
            .create_table(
                Table::create()
                    .table(RomanceRelationships::Table)
                    .if_not_exists()
                    .col(uuid_pk(RomanceRelationships::Id))
                    .col(tag(RomanceRelationships::RomanceType))
                    .col(uuid_col(RomanceRelationships::PlayerId))
                    .col(uuid_col(RomanceRelationships::TargetId))
                    .col(uuid_col(RomanceRelationships::PairLow))
                    .col(uuid_col(RomanceRelationships::PairHigh))
                    .col(
                        ColumnDef::new(RomanceRelationships::ActivePairKey)
                            .string()
                            .null(),
                    )
                    .col(score(RomanceRelationships::RelationshipScore, 0))
                    .col(score(RomanceRelationships::ChemistryScore, 0))
                    .col(score(RomanceRelationships::TrustScore, 0))
                    .col(score(RomanceRelationships::PhysicalIntimacy, 0))
                    .col(score(RomanceRelationships::EmotionalIntimacy, 0))
                    .col(tag(RomanceRelationships::RelationshipStage))
                    .col(flag(RomanceRelationships::IsActive, true))
                    .col(flag(RomanceRelationships::IsRomantic, false))
                    .col(flag(RomanceRelationships::IsPublic, false))
                    .col(tag(RomanceRelationships::ConsentStatus))
                    .col(score(RomanceRelationships::RelationshipHealth, 100))
                    .col(
                        ColumnDef::new(RomanceRelationships::Flags)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(
                        ColumnDef::new(RomanceRelationships::Metadata)
                            .text()
                            .not_null()
                            .default("{}"),
                    )
                    .col(ts(RomanceRelationships::CreatedAt))
                    .col(ts(RomanceRelationships::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // At most one active romance per (type, unordered pair); inactive rows carry NULL
        manager
            .create_index(
                Index::create()
                    .name("ux_romance_relationships_active_pair")
                    .table(RomanceRelationships::Table)
                    .col(RomanceRelationships::ActivePairKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_romance_relationships_pair")
                    .table(RomanceRelationships::Table)
                    .col(RomanceRelationships::PairLow)
                    .col(RomanceRelationships::PairHigh)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_romance_relationships_player_updated")
                    .table(RomanceRelationships::Table)
                    .col(RomanceRelationships::PlayerId)
                    .col(RomanceRelationships::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        // romance_privacy_settings
        manager
            .create_table(
                Table::create()
                    .table(RomancePrivacySettings::Table)
                    .if_not_exists()
                    .col(uuid_col(RomancePrivacySettings::PlayerId))
                    .col(tag(RomancePrivacySettings::RomanceType))
                    .col(flag(RomancePrivacySettings::ShowRelationshipStatus, true))
                    .col(flag(RomancePrivacySettings::ShowRomanceEvents, true))
                    .col(flag(RomancePrivacySettings::AllowRomanceRequests, true))
                    .col(ts(RomancePrivacySettings::UpdatedAt))
                    .primary_key(
                        Index::create()
                            .col(RomancePrivacySettings::PlayerId)
                            .col(RomancePrivacySettings::RomanceType),
                    )
                    .to_owned(),
            )
            .await?;

        // romance_notifications
        manager
            .create_table(
                Table::create()
                    .table(RomanceNotifications::Table)
                    .if_not_exists()
                    .col(uuid_pk(RomanceNotifications::Id))
                    .col(uuid_col(RomanceNotifications::PlayerId))
                    .col(tag(RomanceNotifications::NotificationType))
                    .col(
                        ColumnDef::new(RomanceNotifications::RelationshipId)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RomanceNotifications::Message)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(flag(RomanceNotifications::IsRead, false))
                    .col(
                        ColumnDef::new(RomanceNotifications::Metadata)
                            .text()
                            .not_null()
                            .default("{}"),
                    )
                    .col(ts(RomanceNotifications::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_romance_notifications_player_created")
                    .table(RomanceNotifications::Table)
                    .col(RomanceNotifications::PlayerId)
                    .col(RomanceNotifications::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // notification_preferences
        manager
            .create_table(
                Table::create()
                    .table(NotificationPreferences::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NotificationPreferences::PlayerId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(flag(NotificationPreferences::RomanceUpdates, true))
                    .col(flag(NotificationPreferences::AllianceUpdates, true))
                    .col(flag(NotificationPreferences::TrustUpdates, true))
                    .col(flag(NotificationPreferences::RatingUpdates, true))
                    .col(ts(NotificationPreferences::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order; indexes go with their tables
        manager
            .drop_table(Table::drop().table(NotificationPreferences::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RomanceNotifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RomancePrivacySettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RomanceRelationships::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ArbitrationCases::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InteractionHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SocialCapital::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PlayerRatings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AllianceInvitations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AllianceMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alliances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TrustContracts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TrustLevels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Relationships::Table).to_owned())
            .await?;

        Ok(())
    }
}
