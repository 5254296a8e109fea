use sea_orm_migration::prelude::*;

/// Campaigns (抽奖活动)
#[derive(DeriveIden)]
enum Campaigns {
    Table,
    Id,
    Name,
    BackgroundUrl,
    OneWinPerPerson,
    CreatedAt,
}

/// People (参与者)
#[derive(DeriveIden)]
enum People {
    Table,
    Id,
    FullName,
    Phone,
}

/// Entries (抽奖码)
#[derive(DeriveIden)]
enum Entries {
    Table,
    Id,
    CampaignId,
    PersonId,
    Code,
    Consumed,
}

/// Prizes (奖品配置)
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    CampaignId,
    Name,
    ImageUrl,
    WinnersQuota,
    Mode,
    CreatedAt,
}

/// Preset assignments (预设中奖名单)
#[derive(DeriveIden)]
enum PresetAssignments {
    Table,
    Id,
    PrizeId,
    EntryId,
}

/// Winners (中奖记录)
#[derive(DeriveIden)]
enum Winners {
    Table,
    Id,
    CampaignId,
    PrizeId,
    EntryId,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 初始表结构:
/// - entries.(campaign_id, code) 唯一 — 同一活动内码不可重复
/// - preset_assignments.(prize_id, entry_id) 唯一 — 预设名单不可重复登记
/// - winners.(prize_id, entry_id) 唯一 — 并发抽奖提交时的最终防线
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 活动表
        manager
            .create_table(
                Table::create()
                    .table(Campaigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campaigns::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Campaigns::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Campaigns::BackgroundUrl).string_len(1024).null())
                    .col(
                        ColumnDef::new(Campaigns::OneWinPerPerson)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Campaigns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 参与者表
        manager
            .create_table(
                Table::create()
                    .table(People::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(People::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(People::FullName).string_len(255).not_null())
                    .col(ColumnDef::new(People::Phone).string_len(32).null())
                    .to_owned(),
            )
            .await?;

        // 抽奖码表
        manager
            .create_table(
                Table::create()
                    .table(Entries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Entries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Entries::CampaignId).big_integer().not_null())
                    .col(ColumnDef::new(Entries::PersonId).big_integer().not_null())
                    .col(ColumnDef::new(Entries::Code).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Entries::Consumed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entries_campaign")
                            .from(Entries::Table, Entries::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entries_person")
                            .from(Entries::Table, Entries::PersonId)
                            .to(People::Table, People::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 活动内码唯一
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_entries_campaign_code_unique")
                    .table(Entries::Table)
                    .col(Entries::CampaignId)
                    .col(Entries::Code)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 奖品表
        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prizes::CampaignId).big_integer().not_null())
                    .col(ColumnDef::new(Prizes::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Prizes::ImageUrl).string_len(1024).null())
                    .col(
                        ColumnDef::new(Prizes::WinnersQuota)
                            .big_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Prizes::Mode)
                            .string_len(16)
                            .not_null()
                            .default("random"),
                    )
                    .col(
                        ColumnDef::new(Prizes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prizes_campaign")
                            .from(Prizes::Table, Prizes::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 预设中奖名单表
        manager
            .create_table(
                Table::create()
                    .table(PresetAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PresetAssignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PresetAssignments::PrizeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PresetAssignments::EntryId)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_preset_assignments_prize")
                            .from(PresetAssignments::Table, PresetAssignments::PrizeId)
                            .to(Prizes::Table, Prizes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_preset_assignments_entry")
                            .from(PresetAssignments::Table, PresetAssignments::EntryId)
                            .to(Entries::Table, Entries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_preset_assignments_prize_entry_unique")
                    .table(PresetAssignments::Table)
                    .col(PresetAssignments::PrizeId)
                    .col(PresetAssignments::EntryId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 中奖记录表
        manager
            .create_table(
                Table::create()
                    .table(Winners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Winners::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Winners::CampaignId).big_integer().not_null())
                    .col(ColumnDef::new(Winners::PrizeId).big_integer().not_null())
                    .col(ColumnDef::new(Winners::EntryId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Winners::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_winners_campaign")
                            .from(Winners::Table, Winners::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_winners_prize")
                            .from(Winners::Table, Winners::PrizeId)
                            .to(Prizes::Table, Prizes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_winners_entry")
                            .from(Winners::Table, Winners::EntryId)
                            .to(Entries::Table, Entries::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一奖品同一码只允许一条中奖记录 — 事务重查之外的约束防线
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_winners_prize_entry_unique")
                    .table(Winners::Table)
                    .col(Winners::PrizeId)
                    .col(Winners::EntryId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 历史查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_winners_campaign")
                    .table(Winners::Table)
                    .col(Winners::CampaignId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序：中奖记录 -> 预设名单 -> 奖品 -> 抽奖码 -> 参与者 -> 活动
        manager
            .drop_table(Table::drop().if_exists().table(Winners::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(PresetAssignments::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Entries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(People::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().if_exists().table(Campaigns::Table).to_owned())
            .await?;

        Ok(())
    }
}
