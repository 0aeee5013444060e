use mimalloc::MiMalloc;
use tlumacz::api::OpenAiClient;
use tlumacz::db::TranslatorStorage;
use tlumacz::prompt::PromptTemplateStore;
use tlumacz::router::{TranslatorState, admin_router, translator_router};
use tlumacz::{Config, TranslationService};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        openai_base_url = %cfg.openai_base_url,
        openai_model = %cfg.openai_model,
        prompt_path = %cfg.prompt_path.display(),
        prompt_fallback = ?cfg.prompt_fallback,
        loglevel = %cfg.loglevel
    );

    let storage = match TranslatorStorage::connect(&cfg.database_url).await {
        Ok(storage) => Some(storage),
        Err(e) => {
            error!(
                database_url = %cfg.database_url,
                error = %e,
                "failed to connect to the database; store-backed endpoints will answer 503"
            );
            None
        }
    };

    let templates = PromptTemplateStore::new(cfg.prompt_path.clone(), cfg.prompt_fallback);
    let client = OpenAiClient::new(&cfg)?;
    let service = TranslationService::new(storage, templates, client);
    let state = TranslatorState::new(service, cfg.max_body_bytes);

    let api = translator_router(state.clone());
    let admin = admin_router(state);

    let api_listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    let admin_listener = TcpListener::bind(cfg.admin_addr.as_str()).await?;
    info!("Admin server listening on {}", cfg.admin_addr);

    tokio::try_join!(
        async {
            axum::serve(api_listener, api)
                .with_graceful_shutdown(shutdown_signal())
                .await
        },
        async {
            axum::serve(admin_listener, admin)
                .with_graceful_shutdown(shutdown_signal())
                .await
        }
    )?;
    info!("servers stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
