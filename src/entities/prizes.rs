use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 奖品选取方式
/// - Random: 纯随机
/// - PresetFirst: 先按预设名单发放，预设用尽后回落随机
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "snake_case")]
pub enum PrizeMode {
    #[sea_orm(string_value = "random")]
    Random,
    #[sea_orm(string_value = "preset_first")]
    PresetFirst,
}

/// 奖品实体
/// - winners_quota: 名额（正整数）
/// - 已产生的中奖数不落在本表，始终由 winners 记录数计算
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub campaign_id: i64,
    pub name: String,
    /// 奖品图（仅展示用）
    pub image_url: Option<String>,
    pub winners_quota: i64,
    pub mode: PrizeMode,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
