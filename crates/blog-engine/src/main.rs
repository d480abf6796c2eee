use bloggraph_core::api::BlogApi;
use bloggraph_core::config::Config;
use bloggraph_core::stdio::run_stdio;
use bloggraph_core::BlogStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let store = if config.seed {
        BlogStore::seeded()
    } else {
        BlogStore::new()
    };
    let (users, posts, comments) = store.counts();
    info!(users, posts, comments, "store ready");

    let api = Arc::new(BlogApi::new(Arc::new(store)));
    info!("bloggraph serving JSON-RPC on stdio");
    run_stdio(api).await
}
