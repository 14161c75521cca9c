use serde::Serialize;
use sst_auth::{KeyringTokenStore, TokenStore};

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
}

pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    KeyringTokenStore::new().clear()?;
    output(&AuthLogoutResponse { cleared: true }, flags.format)
}
