//! 成绩存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::GradeActiveModel;
use crate::errors::{GradebookError, Result};
use crate::models::grades::entities::Grade;
use crate::storage::NewGrade;
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 批量创建成绩
    ///
    /// 分值不做范围校验，由调用方保证。
    pub async fn create_grades_impl(&self, grades: Vec<NewGrade>) -> Result<Vec<Grade>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::database_operation(format!("开启事务失败: {e}")))?;

        let mut created = Vec::with_capacity(grades.len());
        for grade in grades {
            let model = GradeActiveModel {
                value: Set(grade.value),
                student_id: Set(grade.student_id),
                subject_id: Set(grade.subject_id),
                ..Default::default()
            };

            let result = model
                .insert(&txn)
                .await
                .map_err(|e| GradebookError::database_operation(format!("创建成绩失败: {e}")))?;
            created.push(result.into_grade());
        }

        txn.commit()
            .await
            .map_err(|e| GradebookError::database_operation(format!("提交成绩失败: {e}")))?;

        Ok(created)
    }
}
