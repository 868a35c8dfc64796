pub mod lifetime;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::AppStartTime;
use crate::services::reports::{ReportLine, resolve_params};
use crate::services::{ReportService, SeedService};

/// 完整执行一次：建表、写入种子数据、执行全部查询
pub async fn run_once(config: &AppConfig, app_start_time: &AppStartTime) -> Result<Vec<ReportLine>> {
    let startup = lifetime::startup::prepare_startup(config).await?;
    let storage = startup.storage;

    let summary = SeedService::new(storage.clone()).seed(&config.seed).await?;
    let params = resolve_params(&config.queries, &summary);

    let lines = ReportService::new(storage.clone()).run_all(&params).await?;

    lifetime::shutdown::finish(storage, app_start_time).await?;
    Ok(lines)
}
