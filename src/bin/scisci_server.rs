//! scisci-server — SciSciNet 数据问答 Agent 的 HTTP 服务
//!
//! Process bootstrap for the HTTP facade: logging, settings from the
//! environment, eager dataset load, explicit agent construction, then
//! serve until ctrl-c. Fails before binding when the credential or the
//! dataset is unusable.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use sciscinet_agent::server::{serve, ServerState};
use sciscinet_agent::tools::catalog::dataset_registry;
use sciscinet_agent::{Agent, AnthropicClient, DatasetStore, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("info".parse()?),
        )
        .init();

    let settings = Settings::from_env();

    // Load the tables up front so a bad data directory stops the process
    // here instead of failing the first query.
    let store = Arc::new(DatasetStore::new(settings.data_dir.clone()));
    store.preload().with_context(|| {
        format!(
            "loading dataset tables from {}",
            settings.data_dir.display()
        )
    })?;

    let service = AnthropicClient::from_env(settings.model.clone(), settings.max_tokens)?;
    let agent = Agent::builder()
        .with_service(service)
        .with_registry(dataset_registry(Arc::clone(&store)))
        .with_max_rounds(settings.max_rounds)
        .build()?;

    info!(
        model = %settings.model,
        bind = %settings.bind,
        "starting sciscinet-agent server"
    );
    serve(ServerState::new(agent, store), &settings.bind).await?;

    info!("server stopped");
    Ok(())
}
