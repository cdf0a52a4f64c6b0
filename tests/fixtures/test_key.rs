// Test key for JWT signing
// Generated with: openssl genrsa -traditional -out test_key_pkcs1.pem 2048

use std::path::PathBuf;

#[allow(dead_code)]
pub const TEST_PRIVATE_KEY: &str = include_str!("test_key_pkcs1.pem");

#[allow(dead_code)]
pub const TEST_APP_ID: u64 = 123456;

#[allow(dead_code)]
pub fn key_path() -> PathBuf {
    PathBuf::from(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/test_key_pkcs1.pem"
    ))
}

#[allow(dead_code)]
pub fn malformed_key_path() -> PathBuf {
    PathBuf::from(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/malformed_key.pem"
    ))
}

/// Valid PEM and base64, but the bytes are not an RSA key.
#[allow(dead_code)]
pub fn corrupt_der_key_path() -> PathBuf {
    PathBuf::from(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/corrupt_der_key.pem"
    ))
}
