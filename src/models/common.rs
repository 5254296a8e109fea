use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 创建类接口的统一返回
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IdResponse {
    pub id: i64,
}
