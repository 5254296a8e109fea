use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 预设中奖名单实体
/// (prize_id, entry_id) 唯一；id 递增即登记顺序，先登记先发放
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "preset_assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub prize_id: i64,
    pub entry_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
