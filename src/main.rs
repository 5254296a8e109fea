use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use luckydraw_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    draw::{DrawEngine, ThreadRandom},
    handlers,
    middlewares::{AdminAuthMiddleware, create_cors},
    services::*,
    store::DbStore,
    swagger::swagger_config,
    utils::SessionService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 创建会话服务
    let session_service = SessionService::new(
        &config.admin.session_secret,
        config.admin.session_expires_in,
    );

    // 抽奖引擎：生产随机源 + 配置的提交重试预算
    let store = Arc::new(DbStore::new(pool.clone()));
    let engine = web::Data::new(DrawEngine::new(
        store,
        Box::new(ThreadRandom),
        config.draw.spin_retry_budget,
    ));

    // 创建服务
    let auth_service = AuthService::new(config.admin.clone(), session_service.clone());
    let campaign_service = CampaignService::new(pool.clone());
    let prize_service = PrizeService::new(pool.clone());
    let history_service = HistoryService::new(pool.clone());
    let import_service = ImportService::new(pool.clone());

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AdminAuthMiddleware::new(session_service.clone()))
            .app_data(engine.clone())
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(campaign_service.clone()))
            .app_data(web::Data::new(prize_service.clone()))
            .app_data(web::Data::new(history_service.clone()))
            .app_data(web::Data::new(import_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::spin_config)
                    .configure(handlers::campaign_config)
                    .configure(handlers::prize_config)
                    .configure(handlers::history_config)
                    .configure(handlers::admin_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
