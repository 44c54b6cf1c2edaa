use crate::auth::state::BackendKind;
use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{bail, Result};
use secrecy::SecretString;

pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let secret = matches
        .get_one("admin-secret")
        .map(|s: &String| s.to_string())
        .ok_or_else(|| anyhow::anyhow!("missing required argument: --admin-secret"))?;

    // An empty secret would make every login attempt fail open; refuse to start.
    if secret.trim().is_empty() {
        bail!("admin secret must not be empty");
    }

    let backend = match matches
        .get_one::<String>("session-backend")
        .map(String::as_str)
    {
        Some("stateful") => BackendKind::Stateful,
        _ => BackendKind::Stateless,
    };

    let action = Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        backend,
        session_ttl: matches
            .get_one::<u64>("session-ttl")
            .copied()
            .unwrap_or(604_800),
        insecure_cookie: matches.get_flag("insecure-cookie"),
    };

    Ok((action, GlobalArgs::new(SecretString::from(secret))))
}
