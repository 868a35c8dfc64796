use super::SeaOrmStorage;
use crate::entity::prelude::GroupActiveModel;
use crate::errors::{GradebookError, Result};
use crate::models::groups::entities::Group;
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};

impl SeaOrmStorage {
    /// 批量创建分组
    pub async fn create_groups_impl(&self, names: Vec<String>) -> Result<Vec<Group>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| GradebookError::database_operation(format!("开启事务失败: {e}")))?;

        let mut groups = Vec::with_capacity(names.len());
        for name in names {
            let model = GroupActiveModel {
                name: Set(name),
                ..Default::default()
            };

            let result = model
                .insert(&txn)
                .await
                .map_err(|e| GradebookError::database_operation(format!("创建分组失败: {e}")))?;
            groups.push(result.into_group());
        }

        txn.commit()
            .await
            .map_err(|e| GradebookError::database_operation(format!("提交分组失败: {e}")))?;

        Ok(groups)
    }
}
