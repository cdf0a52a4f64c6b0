//! Internal building blocks shared by the client and the auth layer.

pub mod http_client;
pub mod jwt;
