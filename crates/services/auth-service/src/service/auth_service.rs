//! Authentication service - verifies credentials and reconciles the local
//! user record with the identity that was verified.
//!
//! Every attempt is independent: the authenticated user or the failure reason
//! is the return value, nothing is remembered between calls.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use domain::{
    AuthenticationMode, DirectoryIdentity, NewUser, Password, Role, Secret, User, DEFAULT_ROLE,
};
use user_service_lib::repository::{RoleRepository, UserRepository};

use super::failure::AuthFailure;
use super::verifier::{CredentialVerifier, PasswordHashVerifier};
use crate::directory::DirectoryAuthenticator;

/// Message used when the directory fails without saying why
const DIRECTORY_FAILURE: &str = "Directory authentication failed.";

/// Hash checked when the username is unknown, so the attempt costs the same
/// as checking a real account.
static DUMMY_HASH: Lazy<String> = Lazy::new(|| {
    Password::new(Uuid::new_v4().simple().to_string().as_bytes())
        .map(Password::into_string)
        .unwrap_or_default()
});

/// A user whose credentials were verified, with its role loaded.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn username(&self) -> &str {
        &self.user.username
    }

    /// The user record with its role attached
    pub fn into_user(self) -> User {
        let mut user = self.user;
        user.role = Some(self.role);
        user
    }
}

/// Outcome of a login attempt
pub type AuthResult = Result<AuthenticatedUser, AuthFailure>;

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify `secret` for `username` using `mode`
    async fn authenticate(
        &self,
        username: &str,
        secret: &Secret,
        mode: AuthenticationMode,
    ) -> AuthResult;
}

/// Concrete implementation of AuthService over the user store and directory.
pub struct Authenticator {
    directory: Arc<dyn DirectoryAuthenticator>,
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    verifier: Arc<dyn CredentialVerifier>,
    default_role: String,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(
        directory: Arc<dyn DirectoryAuthenticator>,
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
    ) -> Self {
        Self {
            directory,
            users,
            roles,
            verifier: Arc::new(PasswordHashVerifier),
            default_role: DEFAULT_ROLE.to_string(),
        }
    }

    /// Replace the local password verifier
    pub fn with_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    /// Role given to directory users provisioned on first login
    pub fn with_default_role(mut self, role_name: impl Into<String>) -> Self {
        self.default_role = role_name.into();
        self
    }

    async fn find_user(
        &self,
        username: &str,
        mode: AuthenticationMode,
    ) -> Result<Option<User>, AuthFailure> {
        self.users.find_by_username(username).await.map_err(|e| {
            error!(username, %mode, error = %e, "User lookup failed");
            AuthFailure::persistence("The user store is unavailable.")
        })
    }

    /// Plaintext exists only for the duration of this call.
    fn verify_secret(&self, secret: &Secret, password_hash: &str) -> bool {
        let plain = secret.expose();
        self.verifier.verify(&plain, password_hash)
    }

    async fn authenticate_local(&self, username: &str, secret: &Secret) -> Result<User, AuthFailure> {
        let mode = AuthenticationMode::Local;

        let Some(user) = self.find_user(username, mode).await? else {
            self.verify_secret(secret, &DUMMY_HASH);
            warn!(username, %mode, "Authentication failed: user not found");
            return Err(AuthFailure::InvalidCredentials);
        };

        if !self.verify_secret(secret, &user.password_hash) {
            warn!(username, %mode, "Authentication failed: wrong password");
            return Err(AuthFailure::InvalidCredentials);
        }

        // Account state is only revealed to callers who know the password
        if !user.is_active() {
            warn!(username, %mode, "Authentication refused: account inactive");
            return Err(AuthFailure::AccountInactive);
        }

        info!(username, %mode, "Password verified");
        Ok(user)
    }

    async fn authenticate_directory(
        &self,
        username: &str,
        secret: &Secret,
    ) -> Result<User, AuthFailure> {
        let mode = AuthenticationMode::Directory;

        let mut identity = match self.directory.authenticate(username, secret).await {
            Ok(identity) => identity,
            Err(e) => {
                let message = e.to_string();
                warn!(username, %mode, error = %message, "Directory authentication failed");
                let message = if message.is_empty() {
                    DIRECTORY_FAILURE.to_string()
                } else {
                    message
                };
                return Err(AuthFailure::Directory(message));
            }
        };

        // The directory's spelling of the account is the one stored locally
        if identity.username.trim().is_empty() {
            identity.username = username.to_string();
        }
        let username = identity.username.as_str();

        match self.find_user(username, mode).await? {
            None => self.provision_directory_user(&identity).await,
            Some(user) if !user.is_active() => {
                warn!(username, %mode, "Directory user exists locally but is inactive");
                Err(AuthFailure::AccountInactive)
            }
            Some(mut user) => {
                info!(
                    username,
                    %mode,
                    user_id = %user.id,
                    role_id = ?user.role_id,
                    "Directory user found locally"
                );
                self.sync_profile(&mut user, &identity).await;
                Ok(user)
            }
        }
    }

    async fn provision_directory_user(
        &self,
        identity: &DirectoryIdentity,
    ) -> Result<User, AuthFailure> {
        let username = identity.username.as_str();
        info!(username, "Directory user not found locally, provisioning account");

        let role = match self.roles.find_by_name(&self.default_role).await {
            Ok(Some(role)) => role,
            Ok(None) => {
                error!(
                    username,
                    role = %self.default_role,
                    "Default role not found, cannot provision directory user"
                );
                return Err(AuthFailure::configuration(
                    "the default role for new directory users was not found.",
                ));
            }
            Err(e) => {
                error!(username, role = %self.default_role, error = %e, "Default role lookup failed");
                return Err(AuthFailure::persistence("The user store is unavailable."));
            }
        };

        // Never used: directory accounts do not log in locally
        let placeholder = Secret::from(Uuid::new_v4().simple().to_string());

        match self
            .users
            .create(NewUser::from_directory(identity, role), &placeholder)
            .await
        {
            Ok(user) => {
                info!(
                    username = %user.username,
                    role = user.role.as_ref().map(|r| r.name.as_str()).unwrap_or("-"),
                    "Local account provisioned for directory user"
                );
                Ok(user)
            }
            Err(e) => {
                error!(username, error = %e, "Failed to provision local account for directory user");
                Err(AuthFailure::persistence(
                    "Failed to create a local account for the directory user.",
                ))
            }
        }
    }

    /// Copy changed directory profile fields; a failed save does not fail the login.
    async fn sync_profile(&self, user: &mut User, identity: &DirectoryIdentity) {
        if !user.apply_directory_profile(identity) {
            return;
        }

        match self.users.update(user).await {
            Ok(()) => info!(username = %user.username, "Local profile updated from directory"),
            Err(e) => warn!(
                username = %user.username,
                error = %e,
                "Failed to update local profile from directory"
            ),
        }
    }

    /// Attach the user's role, failing the attempt if it cannot be resolved.
    async fn resolve_role(&self, mut user: User, mode: AuthenticationMode) -> AuthResult {
        if let Some(role) = user.role.take() {
            return Ok(AuthenticatedUser { user, role });
        }

        let Some(role_id) = user.role_id.filter(|id| *id > 0) else {
            error!(username = %user.username, %mode, "CRITICAL: user has no role assigned");
            return Err(AuthFailure::configuration("no role is assigned to the user."));
        };

        match self.roles.find_by_id(role_id).await {
            Ok(Some(role)) => {
                info!(username = %user.username, role = %role.name, "Role loaded by id");
                Ok(AuthenticatedUser { user, role })
            }
            Ok(None) => {
                error!(
                    username = %user.username,
                    role_id,
                    "CRITICAL: assigned role does not exist"
                );
                Err(AuthFailure::configuration("the user's role could not be loaded."))
            }
            Err(e) => {
                error!(username = %user.username, role_id, error = %e, "CRITICAL: role lookup failed");
                Err(AuthFailure::configuration("the user's role could not be loaded."))
            }
        }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn authenticate(
        &self,
        username: &str,
        secret: &Secret,
        mode: AuthenticationMode,
    ) -> AuthResult {
        let username = username.trim();
        if username.is_empty() {
            warn!(%mode, "Authentication attempt with empty username");
            return Err(AuthFailure::validation("Username must not be empty."));
        }
        if secret.is_empty() {
            warn!(username, %mode, "Authentication attempt without a password");
            return Err(AuthFailure::validation("Password must not be empty."));
        }

        let user = match mode {
            AuthenticationMode::Local => self.authenticate_local(username, secret).await?,
            AuthenticationMode::Directory => self.authenticate_directory(username, secret).await?,
        };

        let authenticated = self.resolve_role(user, mode).await?;
        info!(
            username = %authenticated.user.username,
            %mode,
            role = %authenticated.role.name,
            "User authenticated"
        );
        Ok(authenticated)
    }
}
