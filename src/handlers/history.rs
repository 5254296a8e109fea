use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::HistoryService;

#[utoipa::path(
    get,
    path = "/history",
    tag = "history",
    params(
        ("campaignId" = Option<i64>, Query, description = "指定活动 (缺省取最近创建的活动)")
    ),
    responses(
        (status = 200, description = "获取中奖历史成功", body = HistoryResponse)
    )
)]
/// 活动中奖历史，新中奖在前（phone 已脱敏）
pub async fn get_history(
    service: web::Data<HistoryService>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse> {
    match service.history(query.campaign_id).await {
        Ok(data) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": data }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn history_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/history", web::get().to(get_history));
}
