use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::PrizeMode;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::spin::spin,
        handlers::campaign::get_campaigns,
        handlers::prize::get_prizes,
        handlers::history::get_history,
        handlers::admin::login,
        handlers::admin::create_campaign,
        handlers::admin::create_prize,
        handlers::admin::import_entries,
        handlers::admin::import_presets,
        handlers::admin::export_winners,
    ),
    components(
        schemas(
            SpinRequest,
            SpinWonResponse,
            SpinExhaustedResponse,
            CampaignQuery,
            CampaignResponse,
            CreateCampaignRequest,
            PrizeQuery,
            PrizeResponse,
            CreatePrizeRequest,
            PrizeMode,
            HistoryQuery,
            HistoryResponse,
            WinnerHistoryItem,
            WinnerExportQuery,
            EntryImportQuery,
            PresetImportQuery,
            ImportResult,
            AdminLoginRequest,
            AdminLoginResponse,
            IdResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "spin", description = "Draw execution API"),
        (name = "campaign", description = "Campaign API"),
        (name = "prize", description = "Prize API"),
        (name = "history", description = "Winner history API"),
        (name = "admin", description = "Administration API"),
    ),
    info(
        title = "Lucky Draw Backend API",
        version = "1.0.0",
        description = "Prize campaign draw REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
