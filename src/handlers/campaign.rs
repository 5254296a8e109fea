use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::CampaignService;

#[utoipa::path(
    get,
    path = "/campaigns",
    tag = "campaign",
    params(
        ("id" = Option<i64>, Query, description = "指定活动 (缺省返回全部)")
    ),
    responses(
        (status = 200, description = "获取活动成功", body = [CampaignResponse]),
        (status = 404, description = "活动不存在")
    )
)]
/// 活动列表（新建在前）；带 id 时返回单个活动
pub async fn get_campaigns(
    service: web::Data<CampaignService>,
    query: web::Query<CampaignQuery>,
) -> Result<HttpResponse> {
    let result = match query.id {
        Some(id) => service.get_campaign(id).await.map(|c| vec![c]),
        None => service.list_campaigns().await,
    };
    match result {
        Ok(list) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": list }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn campaign_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/campaigns", web::get().to(get_campaigns));
}
