use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use http::header::{HeaderValue, AUTHORIZATION};
use http::Request;
use secrecy::ExposeSecret;
use snafu::ResultExt;
use tower::{BoxError, Layer, Service};

use crate::auth::AppAuth;
use crate::error::{ApiError, HeaderSnafu, JwtSnafu};

/// Produces the `Authorization` header for each outgoing request.
pub trait Signer: Send + Sync + 'static {
    fn authorization(&self) -> Result<HeaderValue, ApiError>;
}

/// Apps sign every request with a freshly minted JWT.
impl Signer for AppAuth {
    fn authorization(&self) -> Result<HeaderValue, ApiError> {
        let jwt = self.generate_bearer_token().context(JwtSnafu)?;
        let mut value = HeaderValue::from_str(&format!("Bearer {}", jwt.expose_secret()))
            .context(HeaderSnafu)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

/// Layer that stamps requests with credentials from a [`Signer`].
#[derive(Clone)]
pub struct AuthHeaderLayer {
    signer: Arc<dyn Signer>,
}

impl AuthHeaderLayer {
    pub fn new(signer: Arc<dyn Signer>) -> Self {
        AuthHeaderLayer { signer }
    }
}

impl<S> Layer<S> for AuthHeaderLayer {
    type Service = AuthHeader<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthHeader {
            inner,
            signer: self.signer.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AuthHeader<S> {
    inner: S,
    signer: Arc<dyn Signer>,
}

impl<S, ReqBody> Service<Request<ReqBody>> for AuthHeader<S>
where
    S: Service<Request<ReqBody>>,
    S::Error: Into<BoxError>,
    S::Response: Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<S::Response, BoxError>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        // A signing failure is reported without sending anything.
        let value = match self.signer.authorization() {
            Ok(value) => value,
            Err(e) => return Box::pin(futures::future::ready(Err(e.into()))),
        };

        req.headers_mut().insert(AUTHORIZATION, value);
        let fut = self.inner.call(req);
        Box::pin(async move { fut.await.map_err(Into::into) })
    }
}
