use crate::errors::Result;
use crate::models::AppStartTime;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::info;

/// 输出最终行数并释放数据库连接
pub async fn finish(storage: Arc<dyn Storage>, app_start_time: &AppStartTime) -> Result<()> {
    let counts = storage.count_dataset().await?;
    info!(
        "Dataset now holds {} groups, {} teachers, {} subjects, {} students, {} grades",
        counts.groups, counts.teachers, counts.subjects, counts.students, counts.grades
    );
    drop(storage);

    info!(
        "Finished in {} ms",
        chrono::Utc::now()
            .signed_duration_since(app_start_time.start_datetime)
            .num_milliseconds()
    );
    Ok(())
}
