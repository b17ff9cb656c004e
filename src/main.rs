mod error;
mod flowchart;
mod llm;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use llm::TextGenerator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Non-fatal: generation routes answer 503 if the client cannot be built.
    let generator: Option<Arc<dyn TextGenerator>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            match client.list_models().await {
                Ok(models) => tracing::info!(model = client.model(), available = ?models, "LLM backend reachable"),
                Err(e) => tracing::warn!(model = client.model(), error = %e, "LLM backend not reachable yet"),
            }
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured, generation disabled");
            None
        }
    };

    let state = state::AppState::new(generator);
    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "prompt2flow listening");
    axum::serve(listener, app).await?;
    Ok(())
}
