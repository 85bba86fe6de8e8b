//! Service layer - administrative use cases.

mod user_service;

pub use user_service::{UserManager, UserService};
