//! Authentication service business logic.

mod auth_service;
mod failure;
mod verifier;

pub use auth_service::{AuthResult, AuthService, AuthenticatedUser, Authenticator};
pub use failure::AuthFailure;
pub use verifier::{CredentialVerifier, PasswordHashVerifier};
