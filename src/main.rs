use clap::Parser;
use tracing_subscriber::EnvFilter;

use danmaku_filter::cli::Cli;
use danmaku_filter::{server, RuleLoader, RuleParser};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config()?;

    // 规则只在启动时加载一次，任何失败都终止启动
    let files = RuleLoader::load(&config.rules_dir)?;
    let rule_set = RuleParser::parse(files)?;
    tracing::info!("已初始化 {} 条规则", rule_set.len());

    server::start(config, rule_set).await?;

    Ok(())
}
