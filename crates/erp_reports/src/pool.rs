use crate::dsn::DatabaseTarget;
use crate::ReportResult;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub const MIN_CONNECTIONS: u32 = 1;
pub const MAX_CONNECTIONS: u32 = 5;

/// Open the pool the questions borrow their connections from.
pub async fn connect_pool(target: &DatabaseTarget) -> ReportResult<PgPool> {
    tracing::info!(
        "connecting to {} on {}:{}",
        target.dbname,
        target.host,
        target.port
    );
    let pool = PgPoolOptions::new()
        .min_connections(MIN_CONNECTIONS)
        .max_connections(MAX_CONNECTIONS)
        .connect_with(target.connect_options())
        .await?;
    Ok(pool)
}
