use axum::Router;
use tokio::net::TcpListener;

use crate::error::TestError;

/// Serves a router on an ephemeral local port.
///
/// Binds `127.0.0.1:0`, spawns the server onto the current tokio runtime and returns the
/// base URL (`http://127.0.0.1:<port>`). The server lives until the runtime shuts down,
/// which for `#[tokio::test]` is the end of the test.
///
/// # Arguments
/// - `router` - Fully configured router with its state already applied
///
/// # Returns
/// - `Ok(String)` - Base URL without trailing slash
/// - `Err(TestError::Io)` - Failed to bind the listener
pub async fn spawn(router: Router) -> Result<String, TestError> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(format!("http://{}", addr))
}
