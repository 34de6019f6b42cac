// ==========================================
// 车队投运计划系统 - 命令行入口
// ==========================================
// 用法: fleet-induction <snapshot.json> [config.toml] [seed]
// 输出: 计划结果 JSON (stdout);日志写 stderr
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::Utc;
use fleet_induction::config::config_keys;
use fleet_induction::{logging, ConfigManager, InductionPlanner, JsonFileFleetSource};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let Some(snapshot_path) = args.next() else {
        bail!("用法: fleet-induction <snapshot.json> [config.toml] [seed]");
    };

    let mut manager = match args.next() {
        Some(path) => ConfigManager::from_file(&path)
            .with_context(|| format!("加载配置失败: {}", path))?,
        None => ConfigManager::new(),
    };
    if let Some(seed) = args.next() {
        manager
            .set(config_keys::RANDOM_SEED, &seed)
            .context("随机种子无效")?;
    }
    let config = manager.build().context("配置校验失败")?;

    tracing::info!(
        version = fleet_induction::VERSION,
        snapshot = %snapshot_path,
        strategy = config.strategy.as_str(),
        strategy_title = config.strategy.title_cn(),
        "{} 启动",
        fleet_induction::APP_NAME
    );

    let planner = InductionPlanner::new(config)?;
    let source = JsonFileFleetSource::new(&snapshot_path);
    let outcome = planner
        .plan_from_source(&source, Utc::now().date_naive())
        .await?;

    for warning in &outcome.warnings {
        tracing::warn!("{}", warning);
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
