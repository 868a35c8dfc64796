use super::SeaOrmStorage;
use crate::entity::prelude::TeacherActiveModel;
use crate::errors::{GradebookError, Result};
use crate::models::teachers::entities::Teacher;
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 批量创建教师
    pub async fn create_teachers_impl(&self, fullnames: Vec<String>) -> Result<Vec<Teacher>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::database_operation(format!("开启事务失败: {e}")))?;

        let mut teachers = Vec::with_capacity(fullnames.len());
        for fullname in fullnames {
            let model = TeacherActiveModel {
                fullname: Set(fullname),
                ..Default::default()
            };

            let result = model
                .insert(&txn)
                .await
                .map_err(|e| GradebookError::database_operation(format!("创建教师失败: {e}")))?;
            teachers.push(result.into_teacher());
        }

        txn.commit()
            .await
            .map_err(|e| GradebookError::database_operation(format!("提交教师失败: {e}")))?;

        Ok(teachers)
    }
}
