//! HTTP glue: one POST route feeding [`App::process_request`].

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json};
use axum::routing::post;
use axum::Router;
use tracing::info;

use crate::app::{App, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::error::Result;

/// Build the router for the webhook endpoint, mounted at `path`.
pub fn router(app: Arc<App>, path: &str) -> Router {
    Router::new()
        .route(path, post(handle_interaction))
        .with_state(app)
}

/// Bind and serve the webhook endpoint until the process exits.
pub async fn serve(app: Arc<App>, addr: SocketAddr, path: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, path, "webhook endpoint listening");
    axum::serve(listener, router(app, path)).await?;
    Ok(())
}

async fn handle_interaction(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());
    let timestamp = headers.get(TIMESTAMP_HEADER).and_then(|v| v.to_str().ok());
    let (status, response) = app.process_request(signature, timestamp, &body);
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;

    #[test]
    fn router_builds_with_an_empty_registry() {
        let client = Client::new("1").unwrap();
        let signing_key = ed25519_dalek::SigningKey::generate(&mut rand::rngs::OsRng);
        let public_key = hex::encode(signing_key.verifying_key().as_bytes());
        let app = App::new(client, &public_key).unwrap();
        let _router = router(Arc::new(app), "/interactions");
    }
}
