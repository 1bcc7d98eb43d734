// Persistence collaborators. Services depend on the traits only; the
// Postgres implementations are wired in at startup.

pub mod training_repository;
pub mod user_repository;

pub use training_repository::{PgTrainingRepository, TrainingRepository};
pub use user_repository::{PgUserRepository, UserRepository};
