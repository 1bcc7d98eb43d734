// Domain entities and request payloads

pub mod training;
pub mod user;

pub use training::*;
pub use user::*;
