use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;
use crate::errors::{GradebookError, Result as GradebookResult};

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 内置默认值，无配置文件也可运行
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "warn")?
            .set_default("database.url", "students.db")?
            .set_default("database.pool_size", 1)?
            .set_default("database.timeout", 5)?
            .set_default("database.sqlx_logging", false)?
            .set_default("seed.groups", 3)?
            .set_default("seed.teachers", 5)?
            .set_default("seed.subjects", 8)?
            .set_default("seed.students", 30)?
            .set_default("seed.grades", 20)?
            .set_default("queries.subject", "")?
            .set_default("queries.group", "")?
            .set_default("queries.teacher", "")?
            .set_default("queries.student", "")?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("GRADEBOOK")
                    .separator("__")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("seed.rng_seed", std::env::var("SEED").ok())?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> GradebookResult<()> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| GradebookError::config("Configuration already initialized"))?;
        Ok(())
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let config = AppConfig::load().expect("defaults should deserialize");
        assert_eq!(config.seed.groups, 3);
        assert_eq!(config.seed.teachers, 5);
        assert_eq!(config.seed.subjects, 8);
        assert_eq!(config.seed.students, 30);
        assert_eq!(config.seed.grades, 20);
        assert!(config.database.pool_size >= 1);
    }

    #[test]
    fn test_init_twice_is_config_error() {
        let _ = AppConfig::init();
        let err = AppConfig::init().unwrap_err();
        assert_eq!(err.code(), "E001");
    }
}
