use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 抽奖码实体
/// - code 在同一活动内唯一（唯一索引保证）
/// - consumed 仅由中奖提交事务翻转，与 winners 记录同生同灭
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub campaign_id: i64,
    pub person_id: i64,
    pub code: String,
    pub consumed: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
