//! The `get` pipeline: key, App client, installation, token, output.

use std::io::Write;
use std::path::PathBuf;

use secrecy::SecretString;
use snafu::ResultExt;
use url::Url;

use crate::auth::AppAuth;
use crate::client::Client;
use crate::credential::{self, OutputFormat};
use crate::error::{ClientSnafu, OutputSnafu};
use crate::installation::{resolve_installation_id, InstallationTransport};
use crate::models::AppId;

/// Everything `get` needs, validated by the CLI.
#[derive(Debug, Clone)]
pub struct HelperConfig {
    pub app_id: AppId,
    pub key_path: PathBuf,
    pub org: String,
    pub api_url: Url,
    pub format: OutputFormat,
}

/// Exchanges the App key for a token of the App's installation in
/// `config.org`.
#[tracing::instrument(skip_all, fields(app_id = %config.app_id, org = %config.org))]
pub async fn fetch_installation_token(config: &HelperConfig) -> crate::Result<SecretString> {
    let app = AppAuth::from_key_file(config.app_id, &config.key_path)?;

    let client = Client::builder()
        .base_uri(config.api_url.clone())
        .app(app)
        .build()
        .context(ClientSnafu)?;

    let installation_id = resolve_installation_id(&client, &config.org).await?;
    InstallationTransport::new(&client, installation_id)
        .token()
        .await
}

/// Runs `get`, writing the credential to `out` only once the token is in hand.
pub async fn get<W: Write>(config: &HelperConfig, out: &mut W) -> crate::Result<()> {
    let token = fetch_installation_token(config).await?;
    credential::write_credential(out, config.format, &token).context(OutputSnafu)
}
