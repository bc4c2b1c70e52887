//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the profile
//! driving ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ProfileCommand, ProfileQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub profiles: Arc<dyn ProfileQuery>,
    pub profile_updates: Arc<dyn ProfileCommand>,
}

impl HttpState {
    /// Bundle the query and command ports.
    ///
    /// A single service usually implements both:
    ///
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use talentlayer_backend::domain::{AvatarFolder, ProfileService};
    /// use talentlayer_backend::inbound::http::state::HttpState;
    /// use talentlayer_backend::outbound::blob::DisabledAvatarStore;
    /// use talentlayer_backend::outbound::memory::{
    ///     InMemoryProfileRepository, InMemoryUserRepository,
    /// };
    ///
    /// let service = Arc::new(ProfileService::new(
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(InMemoryProfileRepository::default()),
    ///     Arc::new(DisabledAvatarStore),
    ///     AvatarFolder::for_namespace("talentlayer"),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// let _profiles = state.profiles.clone();
    /// ```
    pub fn new(profiles: Arc<dyn ProfileQuery>, profile_updates: Arc<dyn ProfileCommand>) -> Self {
        Self {
            profiles,
            profile_updates,
        }
    }
}
