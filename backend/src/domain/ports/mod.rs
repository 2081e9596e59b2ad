//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports ([`UserRepository`]) describe what the domain needs from the
//! document store. Driving ports ([`ExerciseCommand`], [`ExerciseQuery`]) are
//! the use-cases inbound adapters call. Each trait exposes strongly typed
//! errors so adapters map failures into predictable variants.

mod exercise_command;
mod exercise_query;
mod macros;
mod user_repository;

pub(crate) use macros::define_port_error;

pub use exercise_command::{
    AddExerciseRequest, AddedExercise, CreateUserRequest, ExerciseCommand,
};
pub use exercise_query::{ExerciseQuery, UserLog};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
