use serde::Serialize;

/// 学生平均分
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentAverage {
    pub fullname: String,
    pub avg_grade: f64,
}

/// 分组平均分
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAverage {
    pub name: String,
    pub avg_grade: f64,
}

/// 单条学生成绩
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentGrade {
    pub fullname: String,
    pub value: i32,
}
