//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! All types here are shared between the auth and user services.

pub mod constants;
pub mod error;
pub mod identity;
pub mod password;
pub mod role;
pub mod secret;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use identity::{AuthenticationMode, DirectoryIdentity};
pub use password::Password;
pub use role::Role;
pub use secret::{ExposedSecret, Secret, WipeHook};
pub use user::{CreateUser, NewUser, User, UserResponse};
