use std::net::SocketAddr;
use std::sync::Arc;

use payroll_core::PayrollPolicy;

use crate::router::create_router;

/// Run the API server until the process is stopped
pub async fn run_server(policy: Arc<PayrollPolicy>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(policy);

    let addr = format!("{host}:{port}").parse::<SocketAddr>()?;
    tracing::info!("Starting server on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
