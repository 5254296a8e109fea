use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::models::*;
use crate::services::{AuthService, CampaignService, HistoryService, ImportService, PrizeService};

#[utoipa::path(
    post,
    path = "/admin/login",
    tag = "admin",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "登录成功", body = AdminLoginResponse),
        (status = 401, description = "口令错误")
    )
)]
/// 管理端登录，签发会话令牌
pub async fn login(
    service: web::Data<AuthService>,
    body: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse> {
    match service.login(&body.password).await {
        Ok(session) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": session }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/campaigns",
    tag = "admin",
    request_body = CreateCampaignRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建活动成功", body = IdResponse),
        (status = 400, description = "参数校验失败"),
        (status = 401, description = "未授权")
    )
)]
/// 创建活动
pub async fn create_campaign(
    service: web::Data<CampaignService>,
    body: web::Json<CreateCampaignRequest>,
) -> Result<HttpResponse> {
    match service.create_campaign(&body).await {
        Ok(id) => {
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": IdResponse { id } })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/prizes",
    tag = "admin",
    request_body = CreatePrizeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "创建奖品成功", body = IdResponse),
        (status = 400, description = "参数校验失败"),
        (status = 401, description = "未授权"),
        (status = 404, description = "活动不存在")
    )
)]
/// 创建奖品
pub async fn create_prize(
    service: web::Data<PrizeService>,
    body: web::Json<CreatePrizeRequest>,
) -> Result<HttpResponse> {
    match service.create_prize(&body).await {
        Ok(id) => {
            Ok(HttpResponse::Ok().json(json!({ "success": true, "data": IdResponse { id } })))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/import/entries",
    tag = "admin",
    params(
        ("campaignId" = i64, Query, description = "目标活动")
    ),
    request_body(content = String, content_type = "text/csv"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "导入完成", body = ImportResult),
        (status = 401, description = "未授权"),
        (status = 404, description = "活动不存在")
    )
)]
/// 导入抽奖码名单：CSV 列 full_name,phone,code，重复码静默跳过
pub async fn import_entries(
    service: web::Data<ImportService>,
    query: web::Query<EntryImportQuery>,
    body: String,
) -> Result<HttpResponse> {
    match service.import_entries(query.campaign_id, &body).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/import/presets",
    tag = "admin",
    params(
        ("prizeId" = i64, Query, description = "目标奖品")
    ),
    request_body(content = String, content_type = "text/csv"),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "导入完成", body = ImportResult),
        (status = 401, description = "未授权"),
        (status = 404, description = "奖品不存在")
    )
)]
/// 导入预设中奖名单：单列 code，按行序登记优先级
pub async fn import_presets(
    service: web::Data<ImportService>,
    query: web::Query<PresetImportQuery>,
    body: String,
) -> Result<HttpResponse> {
    match service.import_presets(query.prize_id, &body).await {
        Ok(result) => Ok(HttpResponse::Ok().json(json!({ "success": true, "data": result }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/export/winners",
    tag = "admin",
    params(
        ("campaignId" = i64, Query, description = "导出活动")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "CSV 导出成功"),
        (status = 401, description = "未授权"),
        (status = 404, description = "活动不存在")
    )
)]
/// 导出活动中奖名单 CSV（姓名不脱敏，仅管理端可见）
pub async fn export_winners(
    service: web::Data<HistoryService>,
    query: web::Query<WinnerExportQuery>,
) -> Result<HttpResponse> {
    match service.export_winners_csv(query.campaign_id).await {
        Ok(csv) => Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"winners.csv\"",
            ))
            .body(csv)),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/login", web::post().to(login))
            .route("/campaigns", web::post().to(create_campaign))
            .route("/prizes", web::post().to(create_prize))
            .route("/import/entries", web::post().to(import_entries))
            .route("/import/presets", web::post().to(import_presets))
            .route("/export/winners", web::get().to(export_winners)),
    );
}
