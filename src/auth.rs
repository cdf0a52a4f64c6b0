//! GitHub App authentication.

use std::path::Path;

use secrecy::SecretString;
use snafu::ResultExt;

use crate::error::{KeyParseSnafu, KeyReadSnafu};
use crate::internal::jwt::{self, Claims, EncodingKey, Header};
use crate::models::AppId;

/// GitHub allows App JWTs to live at most ten minutes; stay under it.
const JWT_LIFETIME_SECS: u64 = 9 * 60;
/// Backdate `iat` to tolerate clock drift between us and GitHub.
const JWT_CLOCK_SKEW_SECS: u64 = 60;

/// The credentials an App signs its requests with.
#[derive(Clone, Debug)]
pub struct AppAuth {
    pub app_id: AppId,
    pub key: EncodingKey,
}

impl AppAuth {
    pub fn new(app_id: AppId, private_key_pem: &str) -> jwt::Result<Self> {
        let key = jwt::encoding_key_from_pem(private_key_pem.as_bytes())?;
        Ok(Self { app_id, key })
    }

    /// Reads and parses the App's PEM private key. Nothing touches the
    /// network, so a bad key fails before any request is made.
    ///
    /// The PEM envelope only checks the base64 layer; the key body is
    /// decoded when signing, so a trial JWT is signed here as well.
    #[tracing::instrument(skip_all, fields(app_id = %app_id, path = %path.display()))]
    pub fn from_key_file(app_id: AppId, path: &Path) -> crate::Result<Self> {
        let pem = std::fs::read(path).context(KeyReadSnafu { path })?;
        let key = jwt::encoding_key_from_pem(&pem).context(KeyParseSnafu { path })?;
        create_jwt(app_id, &key).context(KeyParseSnafu { path })?;
        tracing::debug!("loaded GitHub App private key");

        Ok(Self { app_id, key })
    }

    /// Generates a fresh App JWT.
    pub fn generate_bearer_token(&self) -> jwt::Result<SecretString> {
        create_jwt(self.app_id, &self.key).map(SecretString::from)
    }
}

/// Signs a JWT that identifies `github_app_id`.
pub fn create_jwt(github_app_id: AppId, key: &EncodingKey) -> jwt::Result<String> {
    let now = jwt::unix_timestamp()?;

    let claims = Claims {
        iss: github_app_id.into_inner(),
        iat: now.saturating_sub(JWT_CLOCK_SKEW_SECS),
        exp: now + JWT_LIFETIME_SECS,
    };

    jwt::encode(&Header::default(), &claims, key)
}
