use crate::models::{
    grades::entities::Grade, groups::entities::Group, students::entities::Student,
    subjects::entities::Subject, teachers::entities::Teacher,
};
use serde::Serialize;

/// 本次写入的全部记录
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedSummary {
    pub groups: Vec<Group>,
    pub teachers: Vec<Teacher>,
    pub subjects: Vec<Subject>,
    pub students: Vec<Student>,
    pub grades: Vec<Grade>,
}

/// 各表行数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetCounts {
    pub groups: u64,
    pub teachers: u64,
    pub subjects: u64,
    pub students: u64,
    pub grades: u64,
}
