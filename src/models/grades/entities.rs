use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    // 成绩ID
    pub id: i64,
    // 分值（种子数据为 1-10，库表不做约束）
    pub value: i32,
    // 学生ID
    pub student_id: i64,
    // 课程ID
    pub subject_id: i64,
}
