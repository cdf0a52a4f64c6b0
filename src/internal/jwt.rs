//! JWT signing for GitHub App authentication
//!
//! A thin layer over `jsonwebtoken` that keeps the key type and the claim
//! layout GitHub expects in one place.

use std::str::FromStr;

use snafu::{ResultExt, Snafu};

/// RSA signing key parsed from the App's PEM file
#[derive(Clone)]
pub struct EncodingKey(jsonwebtoken::EncodingKey);

impl std::fmt::Debug for EncodingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EncodingKey(..)")
    }
}

/// JWT header
#[derive(Debug, Clone)]
pub struct Header {
    pub alg: String,
    pub typ: String,
}

impl Header {
    pub fn new(alg: &'static str) -> Self {
        Self {
            alg: alg.to_string(),
            typ: "JWT".to_string(),
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new("RS256")
    }
}

/// JWT claims for GitHub Apps authentication
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub iss: u64, // Issuer (GitHub App ID)
    pub iat: u64, // Issued at (Unix timestamp)
    pub exp: u64, // Expiration (Unix timestamp, max 10 minutes)
}

#[derive(Debug, Snafu)]
pub enum JwtError {
    #[snafu(display("Invalid RSA private key: {source}"))]
    InvalidKey { source: jsonwebtoken::errors::Error },

    #[snafu(display("Unsupported JWT algorithm {alg:?}"))]
    Algorithm {
        alg: String,
        source: jsonwebtoken::errors::Error,
    },

    #[snafu(display("Failed to encode JWT: {source}"))]
    Encode { source: jsonwebtoken::errors::Error },

    #[snafu(display("System clock is before the Unix epoch"))]
    Time { source: web_time::SystemTimeError },
}

pub type Result<T> = std::result::Result<T, JwtError>;

/// Create encoding key from PEM format (PKCS#1 or PKCS#8)
pub fn encoding_key_from_pem(pem: &[u8]) -> Result<EncodingKey> {
    jsonwebtoken::EncodingKey::from_rsa_pem(pem)
        .map(EncodingKey)
        .context(InvalidKeySnafu)
}

pub fn encode(header: &Header, claims: &Claims, key: &EncodingKey) -> Result<String> {
    let alg = jsonwebtoken::Algorithm::from_str(&header.alg).context(AlgorithmSnafu {
        alg: header.alg.clone(),
    })?;

    let jwt_header = jsonwebtoken::Header {
        alg,
        typ: Some(header.typ.clone()),
        ..Default::default()
    };

    jsonwebtoken::encode(&jwt_header, claims, &key.0).context(EncodeSnafu)
}

/// Seconds since the Unix epoch
pub fn unix_timestamp() -> Result<u64> {
    web_time::SystemTime::now()
        .duration_since(web_time::SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .context(TimeSnafu)
}
