use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    // 教师ID
    pub id: i64,
    // 姓名
    pub fullname: String,
}
