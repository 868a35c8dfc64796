use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    // 分组ID
    pub id: i64,
    // 分组名称
    pub name: String,
}
