//! Crediflow Web Server
//!
//! Run with: cargo run -p crediflow-web

use std::net::SocketAddr;

use crediflow_model::LoanClassifier;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Crediflow Web Server...");

    let config = crediflow_web::config::Config::load()?;

    // Load the model artifact once; it is read-only for the process lifetime
    let classifier = LoanClassifier::load(&config.model.artifact_path)?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = crediflow_web::state::AppState::new(classifier, config);
    let app = crediflow_web::router::build_router(state);

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
