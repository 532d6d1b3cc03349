use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use farmconnect_api::{
    app::build_app,
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,farmconnect_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    if config.jwt_secret.is_none() {
        tracing::warn!("JWT_SECRET is not set; staff endpoints will reject every request");
    }

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!(default_language = %config.default_language, "starting");
    let app = build_app(AppState::new(orm, config));

    tracing::info!("listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
