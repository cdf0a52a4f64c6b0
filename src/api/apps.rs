//! The GitHub Apps API.

use serde::Serialize;

use crate::client::Client;
use crate::error::ApiError;
use crate::models::{Installation, InstallationId, InstallationToken};

/// A client to GitHub's apps API.
///
/// Created with [`Client::apps`].
pub struct AppsHandler<'c> {
    client: &'c Client,
}

impl<'c> AppsHandler<'c> {
    pub(crate) fn new(client: &'c Client) -> Self {
        Self { client }
    }

    /// Lists the installations of the authenticated App.
    /// ```no_run
    /// # async fn run(client: git_credential_github_app::Client) -> Result<(), git_credential_github_app::ApiError> {
    /// let installations = client.apps().installations().per_page(100).send().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn installations(&self) -> ListInstallationsBuilder<'_, 'c> {
        ListInstallationsBuilder::new(self)
    }

    /// Exchanges the App's credentials for an installation access token.
    pub async fn create_installation_access_token(
        &self,
        installation_id: InstallationId,
    ) -> Result<InstallationToken, ApiError> {
        let route = format!("/app/installations/{installation_id}/access_tokens");
        self.client.post::<_, ()>(&route, None).await
    }
}

#[derive(Serialize)]
pub struct ListInstallationsBuilder<'r, 'c> {
    #[serde(skip)]
    handler: &'r AppsHandler<'c>,
    #[serde(skip_serializing_if = "Option::is_none")]
    per_page: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
}

impl<'r, 'c> ListInstallationsBuilder<'r, 'c> {
    fn new(handler: &'r AppsHandler<'c>) -> Self {
        Self {
            handler,
            per_page: None,
            page: None,
        }
    }

    /// Results per page (max 100).
    pub fn per_page(mut self, per_page: u8) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Page number of the results to fetch, starting at 1.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub async fn send(self) -> Result<Vec<Installation>, ApiError> {
        self.handler
            .client
            .get("/app/installations", Some(&self))
            .await
    }
}
