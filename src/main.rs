//! Main entry point for the HTTP tracer demo server

use clap::Parser;
use http_tracer::{
    cli::ServerArgs, init_logger_with_config, log_error, log_info, version, DemoHandler,
    HttpServer, Tracer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    version::exit_if_requested();

    let args = ServerArgs::parse();
    let config = args.load_config()?;

    init_logger_with_config(&config.log_level, &config.logging);

    log_info!("Starting http-tracer {}", env!("CARGO_PKG_VERSION"));
    log_info!("Test with: curl http://{}/version", config.listen_addr);

    let server = HttpServer::bind(config.listen_addr)?;
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log_error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        log_info!("Shutdown signal received");
    };

    server
        .serve_with_shutdown(Tracer::new(DemoHandler::new()), shutdown)
        .await?;
    Ok(())
}
