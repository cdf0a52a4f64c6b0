//! A git credential helper that authenticates as a GitHub App.
//!
//! `get` signs a JWT with the App's private key, finds the App's installation
//! in the requested organization and exchanges the JWT for a short-lived
//! installation access token, which it prints for git:
//!
//! ```text
//! username=x-access-token
//! password=<token>
//! ```
//!
//! `store` and `erase` are accepted and ignored; nothing is cached.

pub mod api;
pub mod auth;
pub mod cli;
mod client;
pub mod credential;
mod error;
pub mod helper;
pub mod installation;
pub mod internal;
pub mod models;
pub mod service;

pub use self::client::{Client, ClientBuilder};
pub use self::error::{ApiError, Error, GitHubError};

pub type Result<T, E = Error> = std::result::Result<T, E>;
