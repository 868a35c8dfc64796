use crate::config::AppConfig;
use crate::errors::Result;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::warn;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 准备运行上下文
/// 打开数据库连接并确保库表存在
pub async fn prepare_startup(config: &AppConfig) -> Result<StartupContext> {
    let storage = crate::storage::create_storage(&config.database).await?;
    storage.ensure_schema().await?;
    warn!("Storage backend initialized and migrations completed");

    let counts = storage.count_dataset().await?;
    if counts.grades > 0 {
        warn!(
            "Database already holds {} grades, seeding will append more rows",
            counts.grades
        );
    }

    Ok(StartupContext { storage })
}
