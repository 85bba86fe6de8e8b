//! LDAP-backed directory authenticator.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use ldap3::{ldap_escape, Ldap, LdapConnAsync, LdapConnSettings, LdapError, Scope, SearchEntry};
use tracing::{debug, warn};

use common::DirectoryConfig;
use domain::{DirectoryIdentity, Secret};

use super::{DirectoryAuthenticator, DirectoryError};

/// LDAP result code for a failed bind
const RC_INVALID_CREDENTIALS: u32 = 49;

const ATTR_ACCOUNT_NAME: &str = "sAMAccountName";
const ATTR_DISPLAY_NAME: &str = "displayName";
const ATTR_MAIL: &str = "mail";

/// Authenticates by binding to an LDAP server as the user.
pub struct LdapDirectory {
    config: DirectoryConfig,
}

impl LdapDirectory {
    pub fn new(config: DirectoryConfig) -> Self {
        Self { config }
    }

    async fn connect(&self) -> Result<Ldap, DirectoryError> {
        let settings = LdapConnSettings::new()
            .set_conn_timeout(Duration::from_secs(self.config.connect_timeout_secs));

        let (conn, ldap) = LdapConnAsync::with_settings(settings, &self.config.url)
            .await
            .map_err(unavailable)?;

        tokio::spawn(async move {
            if let Err(e) = conn.drive().await {
                warn!(error = %e, "LDAP connection closed with error");
            }
        });

        Ok(ldap)
    }

    async fn bind(
        &self,
        ldap: &mut Ldap,
        username: &str,
        secret: &Secret,
    ) -> Result<(), DirectoryError> {
        let bind_name = self.config.bind_name(username);

        let result = {
            let plain = secret.expose();
            // An empty password would turn into an anonymous bind
            let password = plain
                .as_str()
                .filter(|p| !p.is_empty())
                .ok_or(DirectoryError::InvalidCredentials)?;
            ldap.simple_bind(&bind_name, password).await
        }
        .map_err(unavailable)?;

        match result.rc {
            0 => Ok(()),
            RC_INVALID_CREDENTIALS => Err(DirectoryError::InvalidCredentials),
            rc => {
                debug!(rc, text = %result.text, "LDAP bind rejected");
                Err(DirectoryError::Rejected(result.text))
            }
        }
    }

    async fn lookup(
        &self,
        ldap: &mut Ldap,
        username: &str,
    ) -> Result<DirectoryIdentity, DirectoryError> {
        let filter = format!("({}={})", ATTR_ACCOUNT_NAME, ldap_escape(username));

        let (entries, _) = ldap
            .search(
                &self.config.base_dn,
                Scope::Subtree,
                &filter,
                vec![ATTR_ACCOUNT_NAME, ATTR_DISPLAY_NAME, ATTR_MAIL],
            )
            .await
            .map_err(unavailable)?
            .success()
            .map_err(unavailable)?;

        let entry = entries
            .into_iter()
            .next()
            .ok_or_else(|| DirectoryError::NotFound(username.to_string()))?;

        Ok(identity_from_attrs(username, &SearchEntry::construct(entry).attrs))
    }
}

#[async_trait]
impl DirectoryAuthenticator for LdapDirectory {
    async fn authenticate(
        &self,
        username: &str,
        secret: &Secret,
    ) -> Result<DirectoryIdentity, DirectoryError> {
        let mut ldap = self.connect().await?;

        let outcome = match self.bind(&mut ldap, username, secret).await {
            Ok(()) => self.lookup(&mut ldap, username).await,
            Err(e) => Err(e),
        };

        if let Err(e) = ldap.unbind().await {
            debug!(error = %e, "LDAP unbind failed");
        }

        outcome
    }
}

/// Map search attributes onto an identity, defaulting what the entry lacks.
fn identity_from_attrs(username: &str, attrs: &HashMap<String, Vec<String>>) -> DirectoryIdentity {
    let first = |name: &str| {
        attrs
            .get(name)
            .and_then(|values| values.first())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let account = first(ATTR_ACCOUNT_NAME).unwrap_or_else(|| username.to_string());
    let full_name = first(ATTR_DISPLAY_NAME).unwrap_or_else(|| account.clone());
    let email = first(ATTR_MAIL).unwrap_or_default();

    DirectoryIdentity::new(account, full_name, email)
}

fn unavailable(err: LdapError) -> DirectoryError {
    DirectoryError::Unavailable(err.to_string())
}
