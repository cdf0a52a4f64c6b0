use std::fmt;
use std::path::PathBuf;

use snafu::Snafu;

use crate::internal::jwt::JwtError;
use crate::models::InstallationId;

/// Errors surfaced by the credential helper. Each one is fatal.
#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to read GitHub App private key {}", path.display()))]
    KeyRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Failed to load GitHub App private key {}", path.display()))]
    KeyParse { path: PathBuf, source: JwtError },

    #[snafu(display("Failed to set up the GitHub API client"))]
    Client { source: ApiError },

    #[snafu(display("Failed to list GitHub App installations"))]
    Api { source: ApiError },

    #[snafu(display("GitHub App is not installed in organization {org:?}"))]
    OrgNotFound { org: String },

    #[snafu(display("Failed to create an access token for installation {installation_id}"))]
    TokenExchange {
        installation_id: InstallationId,
        source: ApiError,
    },

    #[snafu(display("Failed to write credentials"))]
    Output { source: std::io::Error },
}

impl Error {
    /// True for failures caused by the private key file, which happen before
    /// any request is sent.
    pub fn is_key_load(&self) -> bool {
        matches!(self, Error::KeyRead { .. } | Error::KeyParse { .. })
    }
}

/// Failure of a single GitHub REST call.
#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum ApiError {
    #[snafu(display("GitHub returned an error"))]
    GitHub { source: GitHubError },

    #[snafu(display("Invalid API base URL: {source}"))]
    BaseUri { source: url::ParseError },

    #[snafu(display("Invalid request URI: {source}"))]
    Uri { source: http::Error },

    #[snafu(display("Failed to encode query string: {source}"))]
    Query { source: serde_urlencoded::ser::Error },

    #[snafu(display("Failed to sign request: {source}"))]
    Jwt { source: JwtError },

    #[snafu(display("Invalid header value: {source}"))]
    Header {
        source: http::header::InvalidHeaderValue,
    },

    #[snafu(display("Failed to set up TLS: {source}"))]
    Tls { source: rustls::Error },

    #[snafu(display("HTTP request failed: {source}"))]
    Service {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[snafu(display("Failed to read response body: {source}"))]
    Body { source: hyper::Error },

    #[snafu(display("JSON error in {}: {}", source.path(), source.inner()))]
    Json {
        source: serde_path_to_error::Error<serde_json::Error>,
    },
}

/// Error document GitHub sends with non-success responses.
#[derive(serde::Deserialize, Debug, Clone)]
#[non_exhaustive]
pub struct GitHubError {
    pub documentation_url: Option<String>,
    pub errors: Option<Vec<serde_json::Value>>,
    pub message: String,
    #[serde(skip)]
    pub status_code: http::StatusCode,
}

impl GitHubError {
    /// Builds an error from a response body, falling back to the raw text
    /// when the body isn't GitHub's JSON error document.
    pub fn from_response(status_code: http::StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<GitHubError>(body) {
            Ok(mut error) => {
                error.status_code = status_code;
                error
            }
            Err(_) => GitHubError {
                documentation_url: None,
                errors: None,
                message: String::from_utf8_lossy(body).trim().to_string(),
                status_code,
            },
        }
    }
}

impl fmt::Display for GitHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status_code)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }

        if let Some(documentation_url) = &self.documentation_url {
            write!(f, " (see {documentation_url})")?;
        }

        Ok(())
    }
}

impl std::error::Error for GitHubError {}
