use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    // 课程ID
    pub id: i64,
    // 课程名称
    pub subject_name: String,
    // 授课教师ID
    pub teacher_id: i64,
}
