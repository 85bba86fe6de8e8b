//! Current-user session for a single interactive client.

use tracing::info;

use domain::{AuthenticationMode, Secret};

use crate::service::{AuthFailure, AuthService, AuthenticatedUser};

/// Holds the user of the last successful login for one client.
///
/// A session is owned by its caller, never shared between concurrent logins.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<AuthenticatedUser>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticate and, on success, make the user current.
    ///
    /// Any previous user is signed out first, so a failed attempt leaves the
    /// session empty.
    pub async fn login(
        &mut self,
        auth: &dyn AuthService,
        username: &str,
        secret: &Secret,
        mode: AuthenticationMode,
    ) -> Result<&AuthenticatedUser, AuthFailure> {
        self.current = None;
        let user = auth.authenticate(username, secret, mode).await?;
        Ok(&*self.current.insert(user))
    }

    /// Sign out, returning the user that was current.
    pub fn logout(&mut self) -> Option<AuthenticatedUser> {
        let previous = self.current.take();
        info!(
            username = previous.as_ref().map(|u| u.username()).unwrap_or("N/A"),
            "User logged out"
        );
        previous
    }

    pub fn current_user(&self) -> Option<&AuthenticatedUser> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}
