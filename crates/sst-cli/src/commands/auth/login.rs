use std::io::{BufRead, IsTerminal};
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use sst_auth::{KeyringTokenStore, TokenStore};
use sst_client::ApiClient;
use sst_config::SstConfig;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::output::output;
use crate::progress::track;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    name: Option<String>,
    role: Option<String>,
    plan: Option<String>,
    company_id: Option<i64>,
}

pub async fn handle(
    args: &AuthLoginArgs,
    flags: &GlobalFlags,
    config: &SstConfig,
) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let password = match PasswordSource::pick(args.password_stdin, stdin.is_terminal()) {
        PasswordSource::Piped => read_password(&mut stdin.lock())?,
        PasswordSource::Prompt => non_empty(
            rpassword::prompt_password("Password: ").context("failed to read the password")?,
        )?,
    };

    let store = Arc::new(KeyringTokenStore::new());
    let client = ApiClient::new(&config.api, store.clone()).context("failed to build HTTP client")?;

    let session = track(
        "signing in",
        sst_auth::login_and_store(
            client.http(),
            &config.api,
            store.as_ref(),
            &args.identity,
            &password,
        ),
    )
    .await
    .context("auth login failed")?;

    tracing::debug!(source = ?store.source(), "token stored");

    output(
        &AuthLoginResponse {
            authenticated: true,
            name: session.name,
            role: session.role,
            plan: session.plan,
            company_id: session.company_id,
        },
        flags.format,
    )
}

/// Where the password comes from. A terminal gets a no-echo prompt; a pipe
/// (or `--password-stdin`) is read as one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PasswordSource {
    Piped,
    Prompt,
}

impl PasswordSource {
    const fn pick(password_stdin: bool, stdin_tty: bool) -> Self {
        if password_stdin || !stdin_tty {
            Self::Piped
        } else {
            Self::Prompt
        }
    }
}

fn read_password<R: BufRead>(input: &mut R) -> anyhow::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    non_empty(line.trim_end_matches(['\r', '\n']).to_string())
}

fn non_empty(password: String) -> anyhow::Result<String> {
    if password.is_empty() {
        anyhow::bail!("auth login: empty password");
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn piped_password_keeps_inner_spaces() {
        let password = read_password(&mut Cursor::new(" s3cret pass \r\n")).unwrap();
        assert_eq!(password, " s3cret pass ");
    }

    #[test]
    fn terminal_gets_the_hidden_prompt() {
        assert_eq!(PasswordSource::pick(false, true), PasswordSource::Prompt);
        assert_eq!(PasswordSource::pick(true, true), PasswordSource::Piped);
        assert_eq!(PasswordSource::pick(false, false), PasswordSource::Piped);
    }

    #[test]
    fn empty_password_is_rejected() {
        let err = read_password(&mut Cursor::new("\n")).unwrap_err();
        assert!(err.to_string().contains("empty password"));
        assert!(non_empty(String::new()).is_err());
    }
}
