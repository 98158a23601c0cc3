use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::{Router, Server};
use std::net::SocketAddr;
use tracing::{debug, info};
use trigger::Upstream;

mod health;
mod trigger;


/// Build the application router. The trigger route is nested under
/// `mount_path`; an empty mount path mounts it at the root.
pub(crate) fn router(upstream: Upstream, mount_path: &str) -> Router {
    let trigger_routes = Router::new()
        .route("/trigger", post(trigger::handler))
        .with_state(upstream);

    let app = Router::new().route("/health", get(health::handler));

    // Nesting at the root is not supported by axum.
    if mount_path.is_empty() {
        app.merge(trigger_routes)
    } else {
        app.nest(mount_path, trigger_routes)
    }
}

pub(crate) async fn start_web_server(listen_address: &SocketAddr, mount_path: &str) -> Result<()> {
    let app = router(Upstream::default(), mount_path);

    let server = Server::try_bind(listen_address)
        .with_context(|| format!("failed to bind to {}", listen_address))?
        .serve(app.into_make_service());

    debug!("Web server listening on {}", server.local_addr());

    info!(
        "Trigger endpoint: POST http://{}{}/trigger",
        server.local_addr(),
        mount_path
    );
    info!("Health endpoint: GET http://{}/health", server.local_addr());

    server.await?;

    Ok(())
}
