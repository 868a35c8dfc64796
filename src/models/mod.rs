pub mod grades;
pub mod groups;
pub mod seed;
pub mod students;
pub mod subjects;
pub mod teachers;

use chrono::{DateTime, Utc};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: DateTime<Utc>,
}
