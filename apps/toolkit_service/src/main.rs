use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use toolkit_llm::OpenAICompletionService;
use toolkit_service::{
    app_module::AppState,
    app_router::build_app,
    config::{AppConfig, AppEnvironment},
};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

fn init_tracing(environment: AppEnvironment) -> anyhow::Result<()> {
    let subscriber_builder = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_level(true)
        .with_span_events(FmtSpan::CLOSE);

    match environment {
        AppEnvironment::Dev => tracing::subscriber::set_global_default(
            subscriber_builder.pretty().with_ansi(true).finish(),
        )
        .context("setting dev subscriber failed"),
        AppEnvironment::Prod => tracing::subscriber::set_global_default(
            subscriber_builder.json().with_ansi(false).finish(),
        )
        .context("setting prod subscriber failed"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing(AppEnvironment::from_env())?;

    let config = AppConfig::from_env()
        .inspect_err(|e| tracing::error!("Could not initialize the completion client: {}", e))?;

    let completion = OpenAICompletionService::new(
        config.openai_api_key.clone(),
        config.openai_org_id.clone(),
        config.openai_api_base.clone(),
    );
    let state = AppState::new(Arc::new(completion));
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("unable to bind {}", config.bind_address))?;

    tracing::info!("Server started, listening on {}", config.bind_address);
    axum::serve(listener, app)
        .await
        .context("unable to start server")?;

    Ok(())
}
