use airalert::config::Config;
use airalert::purpleair::PurpleAirClient;
use airalert::twilio::TwilioNotifier;
use airalert::{batch, metrics, validate, web};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = Config::load();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting airalert");
    info!("Sensors configured: {}", config.sensors.len());
    info!("PurpleAir endpoint: {}", config.purpleair_url);

    metrics::init_metrics();

    let source = PurpleAirClient::new(config.purpleair_url.clone());

    if config.web_mode() {
        serve(config, source).await;
        return;
    }

    if let Err(e) = validate::validate_batch(&config) {
        error!("{}", e);
        std::process::exit(1);
    }
    info!("Reading store: {}", config.db_file.display());

    let notifier = TwilioNotifier::new(config.twilio.clone());
    if let Err(e) = batch::run_once(&config.db_file, &config.sensors, &source, &notifier).await {
        error!("Batch run failed: {}", e);
        std::process::exit(1);
    }
}

async fn serve(config: Config, source: PurpleAirClient) {
    if let Err(e) = validate::validate_web(&config) {
        error!("{}", e);
        std::process::exit(1);
    }

    let http_addr = format!("{}:{}", config.bind, config.port);
    let app = web::create_router(source, config.sensors);

    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .unwrap_or_else(|e| {
            error!("Failed to bind to {}: {}", http_addr, e);
            std::process::exit(1);
        });

    info!("HTTP server listening on {}", http_addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("HTTP server error: {}", e);
        std::process::exit(1);
    }

    info!("Shutting down");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
