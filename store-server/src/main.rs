use store_server::{Config, Server, ServerState, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logger();

    let config = Config::from_env();
    tracing::info!(port = config.http_port, "XTech store server starting");

    let state = ServerState::initialize(config)?;
    Server::with_state(state).run().await
}
