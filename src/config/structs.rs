use serde::{Deserialize, Serialize};

use crate::models::seed::requests::SeedPlan;

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub seed: SeedPlan,
    pub queries: QueryParams,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub environment: String,
    pub log_level: String,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,        // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32,     // 连接池大小
    pub timeout: u64,       // 连接超时 (秒)
    pub sqlx_logging: bool, // 是否输出 SQL 语句日志
}

/// 示例查询参数，留空时取本次写入的第一条记录
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryParams {
    pub subject: String,
    pub group: String,
    pub teacher: String,
    pub student: String,
}
