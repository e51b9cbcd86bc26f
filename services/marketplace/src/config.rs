use drivehub_core::tracing::LogFormat;

/// Marketplace service configuration loaded from environment variables.
#[derive(Debug)]
pub struct MarketplaceConfig {
    /// PostgreSQL connection URL of the BaaS relational store.
    pub database_url: String,
    /// Base URL of the BaaS project (e.g. "https://xyz.supabase.co").
    pub baas_url: String,
    /// Public anon key, sent as `apikey` on auth calls. Env var: `BAAS_ANON_KEY`.
    pub baas_anon_key: String,
    /// Service-role key used for storage uploads. Env var: `BAAS_SERVICE_KEY`.
    pub baas_service_key: String,
    /// HS256 secret the BaaS auth server signs access tokens with.
    pub baas_jwt_secret: String,
    /// Storage bucket for car images (default "car-images").
    pub storage_bucket: String,
    /// Domain set on the session cookies.
    pub cookie_domain: String,
    /// TCP port for the HTTP server (default 3120). Env var: `MARKETPLACE_PORT`.
    pub marketplace_port: u16,
    /// `json` (default) or `pretty`. Env var: `LOG_FORMAT`.
    pub log_format: LogFormat,
}

impl MarketplaceConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            baas_url: std::env::var("BAAS_URL")
                .expect("BAAS_URL")
                .trim_end_matches('/')
                .to_owned(),
            baas_anon_key: std::env::var("BAAS_ANON_KEY").expect("BAAS_ANON_KEY"),
            baas_service_key: std::env::var("BAAS_SERVICE_KEY").expect("BAAS_SERVICE_KEY"),
            baas_jwt_secret: std::env::var("BAAS_JWT_SECRET").expect("BAAS_JWT_SECRET"),
            storage_bucket: std::env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "car-images".to_owned()),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            marketplace_port: std::env::var("MARKETPLACE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3120),
            log_format: std::env::var("LOG_FORMAT")
                .map(|v| v.parse().expect("LOG_FORMAT"))
                .unwrap_or_default(),
        }
    }
}
