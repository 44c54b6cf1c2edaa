use crate::api;
use crate::auth::state::{AuthConfig, AuthState};
use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::Result;

/// Handle the server action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Server {
            port,
            backend,
            session_ttl,
            insecure_cookie,
        } => {
            let config = AuthConfig::new(backend)
                .with_session_ttl_seconds(session_ttl)
                .with_cookie_secure(!insecure_cookie);

            let state = AuthState::new(globals.admin_secret.clone(), config);

            api::new(port, state).await?;
        }
    }

    Ok(())
}
