//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ExerciseCommand, ExerciseQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Port for creating users and logging exercises.
    pub commands: Arc<dyn ExerciseCommand>,
    /// Port for listing users and reading logs.
    pub queries: Arc<dyn ExerciseQuery>,
}

impl HttpState {
    /// Bundle the command and query ports.
    ///
    /// A single service usually implements both:
    ///
    /// ```
    /// use std::sync::Arc;
    /// use exercise_tracker::domain::ExerciseTrackerService;
    /// use exercise_tracker::inbound::http::state::HttpState;
    /// use exercise_tracker::outbound::memory::InMemoryUserRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service = Arc::new(ExerciseTrackerService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(service.clone(), service);
    /// # let _ = state;
    /// ```
    #[must_use]
    pub const fn new(
        commands: Arc<dyn ExerciseCommand>,
        queries: Arc<dyn ExerciseQuery>,
    ) -> Self {
        Self { commands, queries }
    }
}
