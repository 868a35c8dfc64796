use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, warn};

// 从 lib.rs 导入模块
use rust_gradebook::config::AppConfig;
use rust_gradebook::models::AppStartTime;
use rust_gradebook::runtime;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 记录程序启动时间
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    // 初始化配置
    setup_panic!();
    if let Err(e) = AppConfig::init() {
        eprintln!("{}", e.format_simple());
        std::process::exit(1);
    }
    let config = AppConfig::get();

    // 初始化日志，标准输出只留给查询结果
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    warn!(
        "Starting {} v{}, database: {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.database.url
    );

    match runtime::run_once(config, &app_start_time).await {
        Ok(lines) => {
            for line in &lines {
                println!("{}", line.render());
            }
            debug!("Printed {} result sets", lines.len());
        }
        Err(e) => {
            drop(guard);
            #[cfg(debug_assertions)]
            eprintln!("{}", e.format_colored());
            #[cfg(not(debug_assertions))]
            eprintln!("{}", e.format_simple());
            std::process::exit(1);
        }
    }
}
