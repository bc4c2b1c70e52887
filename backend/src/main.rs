//! Backend entry-point: loads settings, prepares storage and serves the
//! profile API.

mod server;

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use mockable::{DefaultClock, DefaultEnv};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use talentlayer_backend::AppSettings;
use talentlayer_backend::domain::AvatarFolder;
use talentlayer_backend::domain::ports::AvatarStore;
use talentlayer_backend::inbound::http::error::set_error_exposure;
use talentlayer_backend::inbound::http::health::HealthState;
use talentlayer_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use talentlayer_backend::outbound::blob::{CloudinaryAvatarStore, DisabledAvatarStore};
use talentlayer_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

fn build_avatar_store(settings: &AppSettings) -> std::io::Result<Arc<dyn AvatarStore>> {
    match settings.cloudinary_credentials() {
        Some(credentials) => {
            let store =
                CloudinaryAvatarStore::new(credentials, UPLOAD_TIMEOUT, Arc::new(DefaultClock))
                    .map_err(std::io::Error::other)?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("cloudinary credentials not set; avatar uploads are disabled");
            Ok(Arc::new(DisabledAvatarStore))
        }
    }
}

async fn attach_database(
    config: ServerConfig,
    settings: &AppSettings,
) -> std::io::Result<ServerConfig> {
    let Some(database_url) = settings.database_url.as_deref() else {
        return Ok(config);
    };

    run_migrations(database_url)
        .await
        .map_err(std::io::Error::other)?;
    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.db_pool_size()))
        .await
        .map_err(std::io::Error::other)?;
    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    set_error_exposure(settings.error_exposure());

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr(),
    )
    .with_upload_limit(settings.upload_limit_bytes())
    .with_avatar_folder(AvatarFolder::for_namespace(settings.blob_namespace()))
    .with_avatar_store(build_avatar_store(&settings)?);
    let config = attach_database(config, &settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(addr = %settings.bind_addr(), "profile service listening");
    server.await
}
