use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use drivehub_auth_types::session::SessionSecret;

use crate::infra::auth::BaasAuth;
use crate::infra::db::{
    DbBookingRepository, DbCarRepository, DbProfileRepository, DbRoleRepository,
};
use crate::infra::storage::BaasStorage;

/// Connection details for the BaaS auth server and object storage.
#[derive(Clone)]
pub struct BaasSettings {
    pub url: String,
    pub anon_key: String,
    pub service_key: String,
    pub storage_bucket: String,
}

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub http: reqwest::Client,
    pub baas: BaasSettings,
    pub session_secret: SessionSecret,
    pub cookie_domain: String,
}

impl FromRef<AppState> for SessionSecret {
    fn from_ref(state: &AppState) -> Self {
        state.session_secret.clone()
    }
}

impl AppState {
    pub fn car_repo(&self) -> DbCarRepository {
        DbCarRepository {
            db: self.db.clone(),
        }
    }

    pub fn booking_repo(&self) -> DbBookingRepository {
        DbBookingRepository {
            db: self.db.clone(),
        }
    }

    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn role_repo(&self) -> DbRoleRepository {
        DbRoleRepository {
            db: self.db.clone(),
        }
    }

    pub fn storage(&self) -> BaasStorage {
        BaasStorage {
            http: self.http.clone(),
            base_url: self.baas.url.clone(),
            service_key: self.baas.service_key.clone(),
            bucket: self.baas.storage_bucket.clone(),
        }
    }

    pub fn auth(&self) -> BaasAuth {
        BaasAuth {
            http: self.http.clone(),
            base_url: self.baas.url.clone(),
            anon_key: self.baas.anon_key.clone(),
        }
    }
}
