use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::draw::{DrawEngine, SpinOutcome};
use crate::models::*;

#[utoipa::path(
    post,
    path = "/spin",
    tag = "spin",
    request_body = SpinRequest,
    responses(
        (status = 200, description = "抽中或名额耗尽", body = SpinWonResponse),
        (status = 404, description = "活动或奖品不存在"),
        (status = 409, description = "重试预算内提交始终被并发拒绝")
    )
)]
/// 执行一次抽奖:
/// 1. 名额预检（force 时跳过）
/// 2. 预设名单优先，用尽后随机选取
/// 3. 原子提交，中奖同时标记码已消耗
/// 4. 提交被并发拒绝时整轮重试
pub async fn spin(
    engine: web::Data<DrawEngine>,
    body: web::Json<SpinRequest>,
) -> Result<HttpResponse> {
    let req = body.into_inner();
    match engine.spin(req.campaign_id, req.prize_id, req.force).await {
        Ok(SpinOutcome::Won(winner)) => Ok(HttpResponse::Ok()
            .json(json!({ "success": true, "data": SpinWonResponse::from(winner) }))),
        Ok(SpinOutcome::Exhausted {
            winners_count,
            winners_quota,
        }) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": SpinExhaustedResponse::new(winners_count, winners_quota)
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn spin_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/spin", web::post().to(spin));
}
