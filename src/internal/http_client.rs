//! HTTP client construction
//!
//! A hyper client over rustls. Plain `http://` is allowed so the helper can
//! talk to a GitHub Enterprise proxy or a local mock server.

use bytes::Bytes;
use http_body_util::Full;
use hyper_util::client::legacy::connect::HttpConnector;

/// Response body type returned by the client
pub use hyper::body::Incoming;

/// Request body type accepted by the client
pub type RequestBody = Full<Bytes>;

pub type HttpClient =
    hyper_util::client::legacy::Client<hyper_rustls::HttpsConnector<HttpConnector>, RequestBody>;

pub fn create_client() -> Result<HttpClient, rustls::Error> {
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())?
        .https_or_http()
        .enable_http1()
        .build();

    let client = hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
        .build::<_, RequestBody>(connector);

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_client() {
        let client = create_client();
        assert!(client.is_ok());
    }
}
