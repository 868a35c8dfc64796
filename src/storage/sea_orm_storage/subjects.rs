use super::SeaOrmStorage;
use crate::entity::prelude::SubjectActiveModel;
use crate::errors::{GradebookError, Result};
use crate::models::subjects::entities::Subject;
use crate::storage::NewSubject;
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 批量创建课程
    pub async fn create_subjects_impl(&self, subjects: Vec<NewSubject>) -> Result<Vec<Subject>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::database_operation(format!("开启事务失败: {e}")))?;

        let mut created = Vec::with_capacity(subjects.len());
        for subject in subjects {
            let model = SubjectActiveModel {
                subject_name: Set(subject.subject_name),
                teacher_id: Set(subject.teacher_id),
                ..Default::default()
            };

            let result = model
                .insert(&txn)
                .await
                .map_err(|e| GradebookError::database_operation(format!("创建课程失败: {e}")))?;
            created.push(result.into_subject());
        }

        txn.commit()
            .await
            .map_err(|e| GradebookError::database_operation(format!("提交课程失败: {e}")))?;

        Ok(created)
    }
}
