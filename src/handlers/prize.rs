use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::PrizeService;

#[utoipa::path(
    get,
    path = "/prizes",
    tag = "prize",
    params(
        ("campaignId" = i64, Query, description = "所属活动")
    ),
    responses(
        (status = 200, description = "获取奖品列表成功", body = [PrizeResponse]),
        (status = 404, description = "活动不存在")
    )
)]
/// 活动下的奖品列表，附带实时中奖数
pub async fn get_prizes(
    service: web::Data<PrizeService>,
    query: web::Query<PrizeQuery>,
) -> Result<HttpResponse> {
    match service.list_prizes(query.campaign_id).await {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn prize_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/prizes", web::get().to(get_prizes));
}
