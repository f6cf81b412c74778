//! The `serve` command.

use crate::{server, Result, Settings};

/// Handle the serve command; `host` and `port` override the loaded settings.
pub async fn handle_serve(
    mut settings: Settings,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    if let Some(host) = host {
        settings.host = host;
    }
    if let Some(port) = port {
        settings.port = port;
    }
    server::run(settings).await
}
