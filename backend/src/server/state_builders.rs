//! Builders selecting the user store and wiring it into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use exercise_tracker::domain::ExerciseTrackerService;
use exercise_tracker::domain::ports::UserRepository;
use exercise_tracker::inbound::http::state::HttpState;
use exercise_tracker::outbound::memory::InMemoryUserRepository;
use exercise_tracker::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

fn state_for<R>(repo: Arc<R>, clock: Arc<dyn Clock>) -> HttpState
where
    R: UserRepository + 'static,
{
    let service = Arc::new(ExerciseTrackerService::new(repo, clock));
    HttpState::new(service.clone(), service)
}

/// Build HTTP state backed by PostgreSQL when a pool is configured, otherwise
/// by the in-memory store.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => {
            info!(store = "postgres", "user store selected");
            state_for(Arc::new(DieselUserRepository::new(pool.clone())), clock)
        }
        None => {
            info!(store = "memory", "user store selected");
            state_for(Arc::new(InMemoryUserRepository::new()), clock)
        }
    };
    web::Data::new(state)
}
