pub mod handlers;
pub mod shared;
pub mod system;
pub mod usecases;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use handlers::top_data::AppState;
use shared::collaborators::host_api::HostApiClient;
use shared::collaborators::{AccountProvider, ReportFetcher, VariableStore};
use usecases::u508_refresh_top_data::RefreshExecutor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = shared::config::load_config()?;
    let port = config.server.port;

    // Один HTTP-клиент хост-платформы закрывает все три контракта
    let host_client = Arc::new(HostApiClient::new(config.host_api, config.reports));

    let store: Arc<dyn VariableStore> = host_client.clone();
    let executor = RefreshExecutor::new(
        host_client.clone() as Arc<dyn AccountProvider>,
        host_client.clone() as Arc<dyn ReportFetcher>,
        store.clone(),
    );

    let state = Arc::new(AppState { executor, store });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // UseCase u508: Refresh Top Data
        .route("/api/u508/refresh", post(handlers::top_data::refresh))
        .route("/api/u508/slots/:kind", get(handlers::top_data::get_slots))
        .route(
            "/api/u508/date-range",
            get(handlers::top_data::get_date_range).post(handlers::top_data::set_date_range),
        )
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
