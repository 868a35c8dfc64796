use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    // 学生ID
    pub id: i64,
    // 姓名
    pub fullname: String,
    // 所属分组ID，未分组时为空
    pub group_id: Option<i64>,
}
