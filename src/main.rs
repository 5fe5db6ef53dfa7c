use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use voxnote::{
    create_router, AppState, Config, EmailJsClient, FileExportSink, NoteSession,
    RecognitionBackendFactory, RecognitionConfig, SessionConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = Config::load("config/voxnote")?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!(
        "HTTP server will bind to {}:{}",
        cfg.service.http.bind, cfg.service.http.port
    );
    info!("Recognition locale: {}", cfg.recognition.locale);

    // Probe for the recognition capability. Unavailability is fatal to the
    // listening feature, so the service refuses to start without it.
    let source = RecognitionBackendFactory::parse_source(&cfg.recognition.source)?;
    let recognition_config = RecognitionConfig {
        locale: cfg.recognition.locale.clone(),
        ..RecognitionConfig::default()
    };
    let backend = match RecognitionBackendFactory::create(source, recognition_config) {
        Ok(b) => b,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    let delivery = Arc::new(EmailJsClient::new(cfg.delivery.clone()));
    let export_sink = Arc::new(FileExportSink::new(
        &cfg.export.output_dir,
        &cfg.export.filename,
    ));

    let session_config = SessionConfig {
        locale: cfg.recognition.locale.clone(),
        ..SessionConfig::default()
    };
    let session = Arc::new(NoteSession::new(
        session_config,
        backend,
        delivery,
        export_sink,
    ));

    let app = create_router(AppState::new(Arc::clone(&session)));

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Teardown must run on every exit path so the capture process does not
    // outlive the session
    session.close().await?;
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {}", e);
    }
    info!("Shutdown signal received");
}
