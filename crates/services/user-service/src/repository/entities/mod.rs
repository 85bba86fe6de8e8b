//! SeaORM entities.

pub mod role;
pub mod user;
