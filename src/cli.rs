//! Command-line interface.
//!
//! git runs credential helpers as `<helper> [options] <get|store|erase>`, so
//! the options are global: they may appear before or after the verb, and can
//! also come from the environment.

use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueHint};
use url::Url;

use crate::credential::OutputFormat;
use crate::helper::{self, HelperConfig};
use crate::models::AppId;

const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Parser, Debug)]
#[command(name = "git-credential-github-app")]
#[command(version, about = "Git credential helper that authenticates as a GitHub App installation", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub options: GetOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options for `get`. They are global and may come from the environment, so
/// `store` and `erase` see them too; values are kept raw and only checked
/// once `get` asks for them.
#[derive(Args, Debug)]
pub struct GetOptions {
    /// GitHub Application ID (required)
    #[arg(short = 'a', long, env = "GITHUB_APP_ID", global = true)]
    pub app_id: Option<OsString>,

    /// GitHub App private key file (required)
    #[arg(short = 'k', long = "key", env = "GITHUB_APP_KEY", global = true, value_hint = ValueHint::FilePath)]
    pub key: Option<OsString>,

    /// GitHub Organization slug (required)
    #[arg(short = 'o', long = "github-org", env = "GITHUB_ORG", global = true)]
    pub github_org: Option<OsString>,

    /// Output token only
    #[arg(short = 't', long, global = true)]
    pub token_only: bool,

    /// GitHub REST API root (GitHub Enterprise: https://HOST/api/v3)
    #[arg(long, env = "GITHUB_API_URL", global = true, default_value = DEFAULT_API_URL)]
    pub api_url: OsString,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get credentials
    Get,

    /// No-op
    #[command(hide = true)]
    Store(NoOpArgs),

    /// No-op
    #[command(hide = true)]
    Erase(NoOpArgs),
}

#[derive(Args, Debug)]
pub struct NoOpArgs {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub args: Vec<String>,
}

/// A parsed and validated command line.
#[derive(Debug)]
pub enum Invocation {
    Get(HelperConfig),
    NoOp,
}

impl Cli {
    /// Checks that `get` has everything it needs. Missing options come back
    /// as a usage error, before anything touches the key or the network.
    pub fn into_invocation(self) -> Result<Invocation, clap::Error> {
        match self.command {
            Command::Get => self.options.into_config().map(Invocation::Get),
            Command::Store(_) | Command::Erase(_) => Ok(Invocation::NoOp),
        }
    }
}

impl GetOptions {
    fn into_config(self) -> Result<HelperConfig, clap::Error> {
        let (app_id, key, org) = match (self.app_id, self.key, self.github_org) {
            (Some(app_id), Some(key), Some(org)) => (app_id, key, org),
            (app_id, key, org) => {
                let missing: Vec<&str> = [
                    (app_id.is_none(), "--app-id <APP_ID>"),
                    (key.is_none(), "--key <KEY>"),
                    (org.is_none(), "--github-org <GITHUB_ORG>"),
                ]
                .into_iter()
                .filter_map(|(absent, name)| absent.then_some(name))
                .collect();

                return Err(Cli::command().error(
                    ErrorKind::MissingRequiredArgument,
                    format!(
                        "the following required arguments were not provided:\n  {}",
                        missing.join("\n  ")
                    ),
                ));
            }
        };

        let app_id = utf8(app_id, "--app-id <APP_ID>")?;
        let app_id = app_id.parse::<u64>().map_err(|e| {
            invalid(ErrorKind::ValueValidation, "--app-id <APP_ID>", &app_id, e)
        })?;

        let key_path = non_empty(key, "--key <KEY>")?;
        let org = non_empty(org, "--github-org <GITHUB_ORG>")?;
        let org = utf8(org, "--github-org <GITHUB_ORG>")?;

        let api_url = utf8(self.api_url, "--api-url <API_URL>")?;
        let api_url = Url::parse(&api_url).map_err(|e| {
            invalid(ErrorKind::ValueValidation, "--api-url <API_URL>", &api_url, e)
        })?;

        Ok(HelperConfig {
            app_id: AppId(app_id),
            key_path: PathBuf::from(key_path),
            org,
            api_url,
            format: OutputFormat::from_token_only(self.token_only),
        })
    }
}

fn invalid(kind: ErrorKind, arg: &str, value: &str, reason: impl fmt::Display) -> clap::Error {
    Cli::command().error(
        kind,
        format!("invalid value '{value}' for '{arg}': {reason}"),
    )
}

fn non_empty(value: OsString, arg: &str) -> Result<OsString, clap::Error> {
    if value.is_empty() {
        return Err(invalid(ErrorKind::InvalidValue, arg, "", "value must not be empty"));
    }
    Ok(value)
}

fn utf8(value: OsString, arg: &str) -> Result<String, clap::Error> {
    value.into_string().map_err(|value| {
        invalid(
            ErrorKind::InvalidUtf8,
            arg,
            &value.to_string_lossy(),
            "invalid UTF-8",
        )
    })
}

/// Executes a validated command line, writing any credential to `out`.
pub async fn run<W: Write>(invocation: Invocation, out: &mut W) -> crate::Result<()> {
    match invocation {
        Invocation::Get(config) => helper::get(&config, out).await,
        Invocation::NoOp => Ok(()),
    }
}
