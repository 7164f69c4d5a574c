use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use banter_api::{build_router, config::Config, state::AppState};
use banter_llm::Completer;
use banter_persist::{MessageStore, MongoMessageStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // A missing MONGODB_URI ends the process here
    let config = Config::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!("Starting banter API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    let completer = Completer::from_config(config.completion_config(), config.model_catalog())?;
    if completer.is_configured() {
        tracing::info!(
            default_model = completer.catalog().default_model(),
            "Completion API configured"
        );
    } else {
        tracing::warn!("GROQ_API_KEY not set, replies will be local fallbacks");
    }

    tracing::info!("Connecting to MongoDB");
    let store: Arc<dyn MessageStore> = Arc::new(
        MongoMessageStore::connect(
            &config.mongodb_uri,
            &config.mongodb.database,
            &config.mongodb.collection,
        )
        .await?,
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(AppState::new(config, store, completer));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("API docs: http://{}/api/docs", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
