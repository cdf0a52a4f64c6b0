//! Resolving an organization to an App installation, and exchanging the App's
//! credentials for that installation's token.

use secrecy::SecretString;
use snafu::{OptionExt, ResultExt};

use crate::client::Client;
use crate::error::{ApiSnafu, OrgNotFoundSnafu, TokenExchangeSnafu};
use crate::models::{Installation, InstallationId};

/// GitHub's maximum page size for `GET /app/installations`.
const INSTALLATIONS_PER_PAGE: u8 = 100;

/// Returns the first installation whose account login is exactly `org`.
pub fn find_installation<'a>(installations: &'a [Installation], org: &str) -> Option<&'a Installation> {
    installations.iter().find(|installation| installation.account.login == org)
}

/// Finds the installation of the authenticated App in `org`.
///
/// Pages through the installation list in response order and stops at the
/// first match, or after the first page that isn't full.
#[tracing::instrument(skip(client))]
pub async fn resolve_installation_id(client: &Client, org: &str) -> crate::Result<InstallationId> {
    let mut page: u32 = 1;

    loop {
        let installations = client
            .apps()
            .installations()
            .per_page(INSTALLATIONS_PER_PAGE)
            .page(page)
            .send()
            .await
            .context(ApiSnafu)?;
        tracing::debug!(page, count = installations.len(), "listed installations");

        if let Some(installation) = find_installation(&installations, org) {
            tracing::debug!(installation_id = %installation.id, "resolved installation");
            return Ok(installation.id);
        }

        if installations.len() < usize::from(INSTALLATIONS_PER_PAGE) {
            return None.context(OrgNotFoundSnafu { org });
        }

        page += 1;
    }
}

/// The App transport narrowed to one installation.
#[derive(Debug, Clone)]
pub struct InstallationTransport<'c> {
    client: &'c Client,
    installation_id: InstallationId,
}

impl<'c> InstallationTransport<'c> {
    pub fn new(client: &'c Client, installation_id: InstallationId) -> Self {
        Self {
            client,
            installation_id,
        }
    }

    /// Performs a fresh token exchange. Tokens are never cached.
    #[tracing::instrument(skip(self), fields(installation_id = %self.installation_id))]
    pub async fn token(&self) -> crate::Result<SecretString> {
        let token = self
            .client
            .apps()
            .create_installation_access_token(self.installation_id)
            .await
            .context(TokenExchangeSnafu {
                installation_id: self.installation_id,
            })?;

        if let Some(expires_at) = token.expires_at {
            tracing::debug!(%expires_at, "created installation access token");
        }

        Ok(token.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Account;

    fn installation(id: u64, login: &str) -> Installation {
        Installation {
            id: InstallationId(id),
            account: Account {
                login: login.to_string(),
            },
        }
    }

    #[test]
    fn picks_exact_match() {
        let installations = [installation(1, "other"), installation(2, "acme")];
        let found = find_installation(&installations, "acme").unwrap();
        assert_eq!(found.id, InstallationId(2));
    }

    #[test]
    fn first_duplicate_wins() {
        let installations = [
            installation(5, "acme"),
            installation(3, "acme"),
            installation(9, "other"),
        ];
        let found = find_installation(&installations, "acme").unwrap();
        assert_eq!(found.id, InstallationId(5));
    }

    #[test]
    fn match_is_case_sensitive() {
        let installations = [installation(1, "Acme")];
        assert!(find_installation(&installations, "acme").is_none());
    }

    #[test]
    fn no_match_in_empty_list() {
        assert!(find_installation(&[], "acme").is_none());
    }
}
