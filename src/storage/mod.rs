use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;
use crate::models::{
    grades::{
        entities::Grade,
        responses::{GroupAverage, StudentAverage, StudentGrade},
    },
    groups::entities::Group,
    seed::responses::DatasetCounts,
    students::entities::Student,
    subjects::entities::Subject,
    teachers::entities::Teacher,
};

pub mod sea_orm_storage;

/// 待写入的学生
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub fullname: String,
    pub group_id: Option<i64>,
}

/// 待写入的课程
#[derive(Debug, Clone)]
pub struct NewSubject {
    pub subject_name: String,
    pub teacher_id: i64,
}

/// 待写入的成绩
#[derive(Debug, Clone)]
pub struct NewGrade {
    pub value: i32,
    pub student_id: i64,
    pub subject_id: i64,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 库表管理方法
    // 确保库表存在（可重复调用）
    async fn ensure_schema(&self) -> Result<()>;
    // 统计各表行数
    async fn count_dataset(&self) -> Result<DatasetCounts>;

    /// 批量写入方法，每批一个事务
    async fn create_groups(&self, names: Vec<String>) -> Result<Vec<Group>>;
    async fn create_teachers(&self, fullnames: Vec<String>) -> Result<Vec<Teacher>>;
    async fn create_subjects(&self, subjects: Vec<NewSubject>) -> Result<Vec<Subject>>;
    async fn create_students(&self, students: Vec<NewStudent>) -> Result<Vec<Student>>;
    async fn create_grades(&self, grades: Vec<NewGrade>) -> Result<Vec<Grade>>;

    /// 只读统计查询
    // 全部课程平均分最高的学生
    async fn top_students_by_average(&self, limit: usize) -> Result<Vec<StudentAverage>>;
    // 某课程平均分最高的学生
    async fn best_student_in_subject(&self, subject_name: &str)
    -> Result<Option<StudentAverage>>;
    // 某课程各分组平均分
    async fn group_averages_for_subject(&self, subject_name: &str) -> Result<Vec<GroupAverage>>;
    // 全部成绩平均分
    async fn overall_average(&self) -> Result<Option<f64>>;
    // 某教师讲授的课程
    async fn subjects_taught_by(&self, teacher_name: &str) -> Result<Vec<String>>;
    // 某分组的学生
    async fn students_in_group(&self, group_name: &str) -> Result<Vec<String>>;
    // 某分组在某课程的成绩
    async fn grades_in_group_for_subject(
        &self,
        group_name: &str,
        subject_name: &str,
    ) -> Result<Vec<StudentGrade>>;
    // 某教师所授课程的平均分
    async fn teacher_average(&self, teacher_name: &str) -> Result<Option<f64>>;
    // 某学生有成绩的课程
    async fn subjects_attended_by(&self, student_name: &str) -> Result<Vec<String>>;
    // 某教师给某学生讲授的课程
    async fn subjects_taught_to(
        &self,
        student_name: &str,
        teacher_name: &str,
    ) -> Result<Vec<String>>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async(config).await?;
    Ok(Arc::new(storage))
}
