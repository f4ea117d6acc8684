//! ChatSherlock demo - Main entry point
//!
//! This is the main executable for the ChatSherlock demo, which exposes the persona
//! search demo and the mailing-list signup over the Model Context Protocol (MCP).

use anyhow::Result;
use chatsherlock_demo::client::{AsyncMailingListClient, AsyncMailingListClientImpl};
use chatsherlock_demo::repositories::{
    CorpusRepository, DemoCorpusRepository, JsonCorpusRepository,
};
use chatsherlock_demo::services::{
    DemoService, DemoServiceImpl, SignupService, SignupServiceImpl,
};
use chatsherlock_demo::{Config, DemoMcpServer, MailingListClient, Metrics};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Configuration first, so LOG_LEVEL can seed the filter when RUST_LOG is unset
    let loaded = Config::from_env();
    let default_filter = loaded
        .as_ref()
        .map(|cfg| cfg.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&default_filter))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match loaded {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let metrics = Metrics::new();

    let repository: Arc<dyn CorpusRepository> = match &config.dataset_dir {
        Some(dir) => {
            info!("Loading persona datasets from {}", dir.display());
            Arc::new(JsonCorpusRepository::new(dir.clone()))
        }
        None => {
            info!("Using embedded persona datasets");
            Arc::new(DemoCorpusRepository::new())
        }
    };

    let demo_service = Arc::new(
        DemoServiceImpl::new(repository, config.snippet_radius).with_metrics(metrics.clone()),
    ) as Arc<dyn DemoService>;

    let signup_service = match &config.mailing_list {
        Some(mailing_list) => {
            info!(
                "Mailing list signup enabled with API URL: {}",
                mailing_list.api_base_url
            );
            let sync_client = MailingListClient::new(mailing_list, config.request_timeout)
                .with_metrics(metrics.clone());
            let client = Arc::new(AsyncMailingListClientImpl::new(sync_client))
                as Arc<dyn AsyncMailingListClient>;
            Some(Arc::new(SignupServiceImpl::new(client).with_metrics(metrics.clone()))
                as Arc<dyn SignupService>)
        }
        None => {
            info!("MAILCHIMP_API_KEY not set, mailing list signup disabled");
            None
        }
    };

    let server = DemoMcpServer::new(demo_service, signup_service);

    info!(
        "ChatSherlock demo initialized (snippet radius: {} characters)",
        config.snippet_radius
    );

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    chatsherlock_demo::server::run_server(server).await?;

    info!(metrics = ?metrics.summary(), "ChatSherlock demo shutdown complete");
    Ok(())
}
