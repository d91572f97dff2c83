mod config;
mod engine;
mod i18n;
mod tui;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // 加载配置
    let config = config::Config::load_or_default()?;

    tui::run(config).await?;

    Ok(())
}
