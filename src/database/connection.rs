use crate::config::DatabaseConfig;
use crate::error::AppResult;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub async fn create_pool(config: &DatabaseConfig) -> AppResult<DatabaseConnection> {
    let mut opt = ConnectOptions::new(config.url.clone());
    opt.max_connections(config.max_connections);
    let conn = Database::connect(opt).await?;
    Ok(conn)
}

pub async fn run_migrations(conn: &DatabaseConnection) -> AppResult<()> {
    Migrator::up(conn, None).await?;
    Ok(())
}
