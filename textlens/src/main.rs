use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use textlens::api::{create_router, AppState};
use textlens::config::Config;
use textlens::ocr::OcrProvider;

#[derive(Parser)]
#[command(name = "textlens")]
#[command(about = "Extract text from uploaded images over HTTP")]
struct Args {
    /// Listen address, overrides HOST
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    init_tracing();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!(
        "Initializing OCR provider (default language: {})...",
        config.ocr.default_language
    );
    let ocr = OcrProvider::new(&config.ocr);
    if !ocr.probe().await {
        tracing::warn!(
            "OCR engine could not load '{}' - recognition requests will fail until tessdata is installed",
            config.ocr.default_language
        );
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let environment = config.server.environment;
    let max_upload = config.max_upload_label();

    let app = create_router(AppState::new(config, ocr));

    tracing::info!("Textlens starting on http://{} ({})", addr, environment);
    tracing::info!("  Health check: http://{}/health", addr);
    tracing::info!("  Recognize:    POST http://{}/api/recognize-text (max {})", addr, max_upload);
    tracing::info!("  API docs:     http://{}/api/docs", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Textlens stopped");
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "textlens=info,tower_http=debug".into());
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests...");
}
