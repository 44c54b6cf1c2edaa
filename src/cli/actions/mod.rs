pub mod server;

use crate::auth::state::BackendKind;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        backend: BackendKind,
        session_ttl: u64,
        insecure_cookie: bool,
    },
}
