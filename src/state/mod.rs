use std::sync::Arc;

use crate::{
    dao::progress_store::ProgressStore,
    services::{
        activity_service::ActivityNotifier, leaderboard_service::LeaderboardService,
        persistence_service::PersistenceCoordinator,
    },
    session::AccessToken,
};

pub type SharedState = Arc<AppState>;

/// Long-lived handles shared by every request.
pub struct AppState {
    coordinator: PersistenceCoordinator,
    notifier: ActivityNotifier,
    leaderboard: LeaderboardService,
    remote: Arc<dyn ProgressStore>,
    access_token: AccessToken,
}

impl AppState {
    /// Bundle the services into an [`Arc`] so it can be cloned cheaply.
    pub fn new(
        coordinator: PersistenceCoordinator,
        notifier: ActivityNotifier,
        leaderboard: LeaderboardService,
        remote: Arc<dyn ProgressStore>,
        access_token: AccessToken,
    ) -> SharedState {
        Arc::new(Self {
            coordinator,
            notifier,
            leaderboard,
            remote,
            access_token,
        })
    }

    /// Save/load coordinator.
    pub fn coordinator(&self) -> &PersistenceCoordinator {
        &self.coordinator
    }

    /// Activity audit notifier.
    pub fn notifier(&self) -> &ActivityNotifier {
        &self.notifier
    }

    /// Leaderboard read path.
    pub fn leaderboard(&self) -> &LeaderboardService {
        &self.leaderboard
    }

    /// Remote store handle, used for health probes.
    pub fn remote(&self) -> &Arc<dyn ProgressStore> {
        &self.remote
    }

    /// Slot holding the session token shared with the remote store.
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }
}
