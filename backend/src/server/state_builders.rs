//! Builders wiring repositories and the avatar store into HTTP state.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::warn;

use talentlayer_backend::domain::ProfileService;
use talentlayer_backend::domain::ports::{ProfileRepository, UserRepository};
use talentlayer_backend::inbound::http::state::HttpState;
use talentlayer_backend::outbound::memory::{InMemoryProfileRepository, InMemoryUserRepository};
use talentlayer_backend::outbound::persistence::{
    DbPool, DieselProfileRepository, DieselUserRepository,
};

use super::ServerConfig;

type Repositories = (Arc<dyn UserRepository>, Arc<dyn ProfileRepository>);

fn build_repositories(pool: Option<&DbPool>) -> Repositories {
    match pool {
        Some(pool) => (
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselProfileRepository::new(pool.clone())),
        ),
        None => {
            warn!("no database configured; profiles are kept in memory");
            (
                Arc::new(InMemoryUserRepository::default()),
                Arc::new(InMemoryProfileRepository::default()),
            )
        }
    }
}

/// Build the handler state from the configured adapters.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let (users, profiles) = build_repositories(config.db_pool.as_ref());
    let service = Arc::new(ProfileService::new(
        users,
        profiles,
        config.avatar_store.clone(),
        config.avatar_folder.clone(),
        Arc::new(DefaultClock),
    ));
    HttpState::new(service.clone(), service)
}
