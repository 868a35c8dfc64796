use super::SeaOrmStorage;
use crate::entity::prelude::StudentActiveModel;
use crate::errors::{GradebookError, Result};
use crate::models::students::entities::Student;
use crate::storage::NewStudent;
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 批量创建学生
    pub async fn create_students_impl(&self, students: Vec<NewStudent>) -> Result<Vec<Student>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::database_operation(format!("开启事务失败: {e}")))?;

        let mut created = Vec::with_capacity(students.len());
        for student in students {
            let model = StudentActiveModel {
                fullname: Set(student.fullname),
                group_id: Set(student.group_id),
                ..Default::default()
            };

            let result = model
                .insert(&txn)
                .await
                .map_err(|e| GradebookError::database_operation(format!("创建学生失败: {e}")))?;
            created.push(result.into_student());
        }

        txn.commit()
            .await
            .map_err(|e| GradebookError::database_operation(format!("提交学生失败: {e}")))?;

        Ok(created)
    }
}
