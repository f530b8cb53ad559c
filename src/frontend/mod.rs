pub mod context;
pub mod http;

use context::FrontendContext;

pub async fn start_all() -> anyhow::Result<()> {
    let ctx = FrontendContext::from_config().await?;
    http::listener::run_http_server(ctx).await
}
