//! Formatting tokens for git.

use std::io::Write;

use secrecy::{ExposeSecret, SecretString};

/// Username GitHub expects alongside an installation token.
pub const USERNAME: &str = "x-access-token";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `username=`/`password=` lines for the git credential protocol.
    #[default]
    Credential,
    /// The bare token.
    TokenOnly,
}

impl OutputFormat {
    pub fn from_token_only(token_only: bool) -> Self {
        if token_only {
            OutputFormat::TokenOnly
        } else {
            OutputFormat::Credential
        }
    }

    pub fn render(self, token: &SecretString) -> String {
        match self {
            OutputFormat::Credential => format!(
                "username={USERNAME}\npassword={}\n",
                token.expose_secret()
            ),
            OutputFormat::TokenOnly => format!("{}\n", token.expose_secret()),
        }
    }
}

/// Writes the rendered token in a single call so git never sees half a
/// credential.
pub fn write_credential<W: Write>(
    out: &mut W,
    format: OutputFormat,
    token: &SecretString,
) -> std::io::Result<()> {
    out.write_all(format.render(token).as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token() -> SecretString {
        SecretString::from("tok_abc")
    }

    #[test]
    fn credential_format() {
        assert_eq!(
            OutputFormat::Credential.render(&token()),
            "username=x-access-token\npassword=tok_abc\n"
        );
    }

    #[test]
    fn token_only_format() {
        assert_eq!(OutputFormat::TokenOnly.render(&token()), "tok_abc\n");
    }

    #[test]
    fn line_counts() {
        assert_eq!(OutputFormat::Credential.render(&token()).lines().count(), 2);
        assert_eq!(OutputFormat::TokenOnly.render(&token()).lines().count(), 1);
    }

    #[test]
    fn flag_selects_format() {
        assert_eq!(OutputFormat::from_token_only(true), OutputFormat::TokenOnly);
        assert_eq!(OutputFormat::from_token_only(false), OutputFormat::Credential);
        assert_eq!(OutputFormat::default(), OutputFormat::Credential);
    }

    #[test]
    fn writes_whole_block() {
        let mut out = Vec::new();
        write_credential(&mut out, OutputFormat::Credential, &token()).unwrap();
        assert_eq!(out, b"username=x-access-token\npassword=tok_abc\n");
    }
}
