//! Environment-driven parsing. Kept in its own test binary so setting
//! process-wide variables cannot leak into other CLI tests.

use clap::error::ErrorKind;
use clap::Parser;
use git_credential_github_app::cli::{Cli, Invocation};

fn parse(args: &[&str]) -> Result<Invocation, clap::Error> {
    Cli::try_parse_from(args)?.into_invocation()
}

#[test]
fn invalid_environment_only_fails_get() {
    std::env::set_var("GITHUB_APP_ID", "not-a-number");
    std::env::set_var("GITHUB_API_URL", "not a url");
    std::env::set_var("GITHUB_APP_KEY", "key.pem");
    std::env::set_var("GITHUB_ORG", "acme");

    for verb in ["store", "erase"] {
        let invocation = parse(&["git-credential-github-app", verb]).unwrap();
        assert!(matches!(invocation, Invocation::NoOp));
    }

    let err = parse(&["git-credential-github-app", "get"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);

    let err = parse(&["git-credential-github-app", "get", "-a", "1"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);

    let invocation = parse(&[
        "git-credential-github-app",
        "get",
        "-a",
        "1",
        "--api-url",
        "https://ghes.example.com/api/v3",
    ])
    .unwrap();
    let Invocation::Get(config) = invocation else {
        panic!("expected get");
    };
    assert_eq!(config.org, "acme");
}
