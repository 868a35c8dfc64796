//! 统计查询
//!
//! 全部为只读查询。按名称过滤均为精确匹配，无匹配时返回空结果。

use super::SeaOrmStorage;
use crate::entity::{grades, groups, students, subjects, teachers};
use crate::errors::{GradebookError, Result};
use crate::models::grades::responses::{GroupAverage, StudentAverage, StudentGrade};
use crate::utils::stats::{average_by_id, mean, rank_descending};
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

impl SeaOrmStorage {
    /// 全部课程平均分最高的学生
    pub async fn top_students_by_average_impl(&self, limit: usize) -> Result<Vec<StudentAverage>> {
        let rows = grades::Entity::find()
            .select_only()
            .column(students::Column::Id)
            .column(students::Column::Fullname)
            .column(grades::Column::Value)
            .join(JoinType::InnerJoin, grades::Relation::Student.def())
            .into_tuple::<(i64, String, i32)>()
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询学生成绩失败: {e}")))?;

        let mut averages = average_by_id(rows);
        rank_descending(&mut averages);

        Ok(averages
            .into_iter()
            .take(limit)
            .map(|(_, fullname, avg_grade)| StudentAverage {
                fullname,
                avg_grade,
            })
            .collect())
    }

    /// 某课程平均分最高的学生
    pub async fn best_student_in_subject_impl(
        &self,
        subject_name: &str,
    ) -> Result<Option<StudentAverage>> {
        let rows = grades::Entity::find()
            .select_only()
            .column(students::Column::Id)
            .column(students::Column::Fullname)
            .column(grades::Column::Value)
            .join(JoinType::InnerJoin, grades::Relation::Student.def())
            .join(JoinType::InnerJoin, grades::Relation::Subject.def())
            .filter(subjects::Column::SubjectName.eq(subject_name))
            .into_tuple::<(i64, String, i32)>()
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询课程成绩失败: {e}")))?;

        let mut averages = average_by_id(rows);
        rank_descending(&mut averages);

        Ok(averages
            .into_iter()
            .next()
            .map(|(_, fullname, avg_grade)| StudentAverage {
                fullname,
                avg_grade,
            }))
    }

    /// 某课程各分组平均分，按分组 ID 排序
    pub async fn group_averages_for_subject_impl(
        &self,
        subject_name: &str,
    ) -> Result<Vec<GroupAverage>> {
        let rows = grades::Entity::find()
            .select_only()
            .column(groups::Column::Id)
            .column(groups::Column::Name)
            .column(grades::Column::Value)
            .join(JoinType::InnerJoin, grades::Relation::Student.def())
            .join(JoinType::InnerJoin, students::Relation::Group.def())
            .join(JoinType::InnerJoin, grades::Relation::Subject.def())
            .filter(subjects::Column::SubjectName.eq(subject_name))
            .into_tuple::<(i64, String, i32)>()
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询分组成绩失败: {e}")))?;

        Ok(average_by_id(rows)
            .into_iter()
            .map(|(_, name, avg_grade)| GroupAverage { name, avg_grade })
            .collect())
    }

    /// 全部成绩平均分
    pub async fn overall_average_impl(&self) -> Result<Option<f64>> {
        let values = grades::Entity::find()
            .select_only()
            .column(grades::Column::Value)
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(mean(&values))
    }

    /// 某教师讲授的课程
    pub async fn subjects_taught_by_impl(&self, teacher_name: &str) -> Result<Vec<String>> {
        subjects::Entity::find()
            .select_only()
            .column(subjects::Column::SubjectName)
            .join(JoinType::InnerJoin, subjects::Relation::Teacher.def())
            .filter(teachers::Column::Fullname.eq(teacher_name))
            .order_by_asc(subjects::Column::Id)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询教师课程失败: {e}")))
    }

    /// 某分组的学生
    pub async fn students_in_group_impl(&self, group_name: &str) -> Result<Vec<String>> {
        students::Entity::find()
            .select_only()
            .column(students::Column::Fullname)
            .join(JoinType::InnerJoin, students::Relation::Group.def())
            .filter(groups::Column::Name.eq(group_name))
            .order_by_asc(students::Column::Id)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询分组学生失败: {e}")))
    }

    /// 某分组在某课程的成绩，按成绩 ID 排序
    pub async fn grades_in_group_for_subject_impl(
        &self,
        group_name: &str,
        subject_name: &str,
    ) -> Result<Vec<StudentGrade>> {
        let rows = grades::Entity::find()
            .select_only()
            .column(students::Column::Fullname)
            .column(grades::Column::Value)
            .join(JoinType::InnerJoin, grades::Relation::Student.def())
            .join(JoinType::InnerJoin, students::Relation::Group.def())
            .join(JoinType::InnerJoin, grades::Relation::Subject.def())
            .filter(groups::Column::Name.eq(group_name))
            .filter(subjects::Column::SubjectName.eq(subject_name))
            .order_by_asc(grades::Column::Id)
            .into_tuple::<(String, i32)>()
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询分组成绩失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(fullname, value)| StudentGrade { fullname, value })
            .collect())
    }

    /// 某教师所授课程的平均分
    pub async fn teacher_average_impl(&self, teacher_name: &str) -> Result<Option<f64>> {
        let values = grades::Entity::find()
            .select_only()
            .column(grades::Column::Value)
            .join(JoinType::InnerJoin, grades::Relation::Subject.def())
            .join(JoinType::InnerJoin, subjects::Relation::Teacher.def())
            .filter(teachers::Column::Fullname.eq(teacher_name))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询教师成绩失败: {e}")))?;

        Ok(mean(&values))
    }

    /// 某学生有成绩的课程（去重）
    pub async fn subjects_attended_by_impl(&self, student_name: &str) -> Result<Vec<String>> {
        let rows = subjects::Entity::find()
            .select_only()
            .column(subjects::Column::Id)
            .column(subjects::Column::SubjectName)
            .distinct()
            .join(JoinType::InnerJoin, subjects::Relation::Grades.def())
            .join(JoinType::InnerJoin, grades::Relation::Student.def())
            .filter(students::Column::Fullname.eq(student_name))
            .order_by_asc(subjects::Column::Id)
            .into_tuple::<(i64, String)>()
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询学生课程失败: {e}")))?;

        Ok(rows.into_iter().map(|(_, name)| name).collect())
    }

    /// 某教师给某学生讲授的课程（去重）
    pub async fn subjects_taught_to_impl(
        &self,
        student_name: &str,
        teacher_name: &str,
    ) -> Result<Vec<String>> {
        let rows = subjects::Entity::find()
            .select_only()
            .column(subjects::Column::Id)
            .column(subjects::Column::SubjectName)
            .distinct()
            .join(JoinType::InnerJoin, subjects::Relation::Grades.def())
            .join(JoinType::InnerJoin, grades::Relation::Student.def())
            .join(JoinType::InnerJoin, subjects::Relation::Teacher.def())
            .filter(students::Column::Fullname.eq(student_name))
            .filter(teachers::Column::Fullname.eq(teacher_name))
            .order_by_asc(subjects::Column::Id)
            .into_tuple::<(i64, String)>()
            .all(&self.db)
            .await
            .map_err(|e| GradebookError::database_operation(format!("查询教师课程失败: {e}")))?;

        Ok(rows.into_iter().map(|(_, name)| name).collect())
    }
}
