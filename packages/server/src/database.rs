use std::time::Duration;

use sea_orm::sea_query::Index;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::entity::{upload, user};

pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.to_owned());

    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(config.sqlx_logging);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("storefront::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}

/// Ensure the indexes backing the admin summary join exist.
///
/// Failures are logged and skipped; the query still works without them.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();

    // user LEFT JOIN upload ON upload.user_id = user.id
    let upload_owner = Index::create()
        .if_not_exists()
        .name("idx_upload_user_id")
        .table(upload::Entity)
        .col(upload::Column::UserId)
        .to_owned();

    // ORDER BY user.created_at DESC
    let user_created = Index::create()
        .if_not_exists()
        .name("idx_user_created_at")
        .table(user::Entity)
        .col(user::Column::CreatedAt)
        .to_owned();

    for (name, stmt) in [
        ("idx_upload_user_id", upload_owner),
        ("idx_user_created_at", user_created),
    ] {
        match db.execute_raw(backend.build(&stmt)).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => warn!("Failed to create index {}: {}", name, e),
        }
    }

    Ok(())
}
