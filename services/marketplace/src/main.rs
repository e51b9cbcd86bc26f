use std::sync::Arc;

use sea_orm::Database;
use tracing::info;

use drivehub_auth_types::session::SessionSecret;
use drivehub_core::tracing::init_tracing;

use drivehub_marketplace::config::MarketplaceConfig;
use drivehub_marketplace::router::build_router;
use drivehub_marketplace::state::{AppState, BaasSettings};

#[tokio::main]
async fn main() {
    let config = MarketplaceConfig::from_env();
    init_tracing(&["drivehub", env!("CARGO_CRATE_NAME")], config.log_format);

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let http = reqwest::Client::builder()
        .user_agent(concat!("drivehub-marketplace/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("failed to build HTTP client");

    let state = AppState {
        db,
        http,
        baas: BaasSettings {
            url: config.baas_url,
            anon_key: config.baas_anon_key,
            service_key: config.baas_service_key,
            storage_bucket: config.storage_bucket,
        },
        session_secret: SessionSecret(Arc::from(config.baas_jwt_secret)),
        cookie_domain: config.cookie_domain,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.marketplace_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("marketplace service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
