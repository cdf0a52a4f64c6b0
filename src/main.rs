use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use git_credential_github_app::cli::{self, Cli};

#[snafu::report]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), git_credential_github_app::Error> {
    // stdout belongs to git; diagnostics go to stderr.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let invocation = Cli::parse().into_invocation().unwrap_or_else(|e| e.exit());
    cli::run(invocation, &mut std::io::stdout()).await
}
