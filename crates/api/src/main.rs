use campusconnect_api::app::build_app;
use campusconnect_api::config::AppConfig;
use campusconnect_store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    campusconnect_observability::init();

    let config = AppConfig::from_env()?;
    let bind = config.bind.clone();

    let store = build_store().await?;
    let app = build_app(config, store);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(feature = "postgres")]
async fn build_store() -> anyhow::Result<Store> {
    if let Ok(url) = std::env::var("CAMPUSCONNECT_DATABASE_URL") {
        let pool = sqlx::PgPool::connect(&url).await?;
        campusconnect_store::postgres::ensure_schema(&pool).await?;
        tracing::info!("using postgres store");
        return Ok(Store::postgres(pool));
    }
    tracing::info!("using in-memory store");
    Ok(Store::in_memory())
}

#[cfg(not(feature = "postgres"))]
async fn build_store() -> anyhow::Result<Store> {
    tracing::info!("using in-memory store");
    Ok(Store::in_memory())
}
