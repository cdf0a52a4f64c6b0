//! A minimal GitHub REST client built from tower layers.

use std::sync::Arc;

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use http::{Method, Request, Response};
use http_body_util::{BodyExt, Full};
use serde::de::DeserializeOwned;
use serde::Serialize;
use snafu::ResultExt;
use tower::util::BoxCloneService;
use tower::{BoxError, ServiceBuilder, ServiceExt};
use tower_http::set_header::SetRequestHeaderLayer;
use url::Url;

use crate::api::apps::AppsHandler;
use crate::auth::AppAuth;
use crate::error::{
    ApiError, BaseUriSnafu, BodySnafu, GitHubError, HeaderSnafu, JsonSnafu, QuerySnafu, TlsSnafu,
    UriSnafu,
};
use crate::internal::http_client::{self, Incoming, RequestBody};
use crate::service::middleware::auth_header::{AuthHeaderLayer, Signer};

const GITHUB_BASE_URI: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

type HttpService = BoxCloneService<Request<RequestBody>, Response<Incoming>, BoxError>;

/// Builds a [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    base_uri: Option<Url>,
    user_agent: Option<String>,
    signer: Option<Arc<dyn Signer>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// API root, e.g. `https://ghes.example.com/api/v3` for GitHub Enterprise.
    pub fn base_uri(mut self, base_uri: Url) -> Self {
        self.base_uri = Some(base_uri);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Authenticate every request as the given GitHub App.
    pub fn app(self, app: AppAuth) -> Self {
        self.signer(Arc::new(app))
    }

    pub fn signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn build(self) -> Result<Client, ApiError> {
        let base_uri = match self.base_uri {
            Some(uri) => uri,
            None => Url::parse(GITHUB_BASE_URI).context(BaseUriSnafu)?,
        };
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let user_agent = HeaderValue::try_from(user_agent).context(HeaderSnafu)?;

        let client = http_client::create_client().context(TlsSnafu)?;

        let headers = ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::overriding(USER_AGENT, user_agent))
            .layer(SetRequestHeaderLayer::if_not_present(
                ACCEPT,
                HeaderValue::from_static(GITHUB_MEDIA_TYPE),
            ))
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static("x-github-api-version"),
                HeaderValue::from_static(GITHUB_API_VERSION),
            ));

        let service = match self.signer {
            Some(signer) => BoxCloneService::new(
                headers
                    .layer(AuthHeaderLayer::new(signer))
                    .service(client),
            ),
            None => BoxCloneService::new(headers.service(client).map_err(BoxError::from)),
        };

        Ok(Client { base_uri, service })
    }
}

/// GitHub REST client. Cheap to clone.
#[derive(Clone)]
pub struct Client {
    base_uri: Url,
    service: HttpService,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_uri", &self.base_uri.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Endpoints under `/app`.
    pub fn apps(&self) -> AppsHandler<'_> {
        AppsHandler::new(self)
    }

    pub async fn get<R, P>(&self, route: &str, parameters: Option<&P>) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let uri = self.absolute_uri(route, parameters)?;
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Full::new(Bytes::new()))
            .context(UriSnafu)?;

        self.send(request).await
    }

    pub async fn post<R, B>(&self, route: &str, body: Option<&B>) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let uri = self.absolute_uri::<()>(route, None)?;
        let mut request = Request::builder().method(Method::POST).uri(uri);

        let body = match body {
            Some(body) => {
                request = request.header(CONTENT_TYPE, "application/json");
                let mut bytes = Vec::new();
                serde_path_to_error::serialize(body, &mut serde_json::Serializer::new(&mut bytes))
                    .context(JsonSnafu)?;
                Full::new(Bytes::from(bytes))
            }
            None => Full::new(Bytes::new()),
        };

        let request = request.body(body).context(UriSnafu)?;
        self.send(request).await
    }

    fn absolute_uri<P>(&self, route: &str, parameters: Option<&P>) -> Result<String, ApiError>
    where
        P: Serialize + ?Sized,
    {
        // `Url::join` would drop a GHES `/api/v3` prefix, so concatenate.
        let mut uri = format!(
            "{}/{}",
            self.base_uri.as_str().trim_end_matches('/'),
            route.trim_start_matches('/')
        );

        if let Some(parameters) = parameters {
            let query = serde_urlencoded::to_string(parameters).context(QuerySnafu)?;
            if !query.is_empty() {
                uri.push('?');
                uri.push_str(&query);
            }
        }

        Ok(uri)
    }

    async fn send<R: DeserializeOwned>(&self, request: Request<RequestBody>) -> Result<R, ApiError> {
        let method = request.method().clone();
        let uri = request.uri().clone();
        tracing::debug!(%method, %uri, "sending GitHub API request");

        let response = self
            .service
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| match e.downcast::<ApiError>() {
                Ok(api_error) => *api_error,
                Err(source) => ApiError::Service { source },
            })?;

        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .context(BodySnafu)?
            .to_bytes();
        tracing::debug!(%method, %uri, %status, "received GitHub API response");

        if !status.is_success() {
            let source = GitHubError::from_response(status, &body);
            return Err(ApiError::GitHub { source });
        }

        let de = &mut serde_json::Deserializer::from_slice(&body);
        serde_path_to_error::deserialize(de).context(JsonSnafu)
    }
}
