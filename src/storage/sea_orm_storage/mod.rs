//! SeaORM 存储实现
//!
//! 统一的数据库存储层，默认使用 SQLite，同时支持 PostgreSQL 和 MySQL。

mod grades;
mod groups;
mod reports;
mod students;
mod subjects;
mod teachers;

use crate::config::DatabaseConfig;
use crate::entity::prelude::{Grades, Groups, Students, Subjects, Teachers};
use crate::errors::{GradebookError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait};
use std::time::Duration;
use tracing::{debug, info};

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例，建表由 `ensure_schema` 负责
    pub async fn new_async(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        info!("SeaORM 存储连接完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 运行迁移，已存在的表保持不变
    pub async fn ensure_schema_impl(&self) -> Result<()> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| GradebookError::migration(format!("数据库迁移失败: {e}")))?;
        debug!("Schema is up to date");
        Ok(())
    }

    /// 统计各表行数
    pub async fn count_dataset_impl(&self) -> Result<DatasetCounts> {
        let count_err = |e: sea_orm::DbErr| {
            GradebookError::database_operation(format!("统计行数失败: {e}"))
        };

        Ok(DatasetCounts {
            groups: Groups::find().count(&self.db).await.map_err(count_err)?,
            teachers: Teachers::find().count(&self.db).await.map_err(count_err)?,
            subjects: Subjects::find().count(&self.db).await.map_err(count_err)?,
            students: Students::find().count(&self.db).await.map_err(count_err)?,
            grades: Grades::find().count(&self.db).await.map_err(count_err)?,
        })
    }

    /// SQLite 专用连接（WAL + pragma）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::ConnectOptions as _;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| GradebookError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("temp_store", "memory");

        if !config.sqlx_logging {
            opt = opt.disable_statement_logging();
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(Self::sqlite_max_connections(url, config.pool_size))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| GradebookError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 内存库每个连接各自独立，只能保留一个连接
    fn sqlite_max_connections(url: &str, pool_size: u32) -> u32 {
        if url.contains(":memory:") || url.contains("mode=memory") {
            1
        } else {
            pool_size.max(1)
        }
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size.max(1))
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .sqlx_logging(config.sqlx_logging);

        Database::connect(opt)
            .await
            .map_err(|e| GradebookError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(GradebookError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::{NewGrade, NewStudent, NewSubject, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 库表模块
    async fn ensure_schema(&self) -> Result<()> {
        self.ensure_schema_impl().await
    }

    async fn count_dataset(&self) -> Result<DatasetCounts> {
        self.count_dataset_impl().await
    }

    // 写入模块
    async fn create_groups(&self, names: Vec<String>) -> Result<Vec<Group>> {
        self.create_groups_impl(names).await
    }

    async fn create_teachers(&self, fullnames: Vec<String>) -> Result<Vec<Teacher>> {
        self.create_teachers_impl(fullnames).await
    }

    async fn create_subjects(&self, subjects: Vec<NewSubject>) -> Result<Vec<Subject>> {
        self.create_subjects_impl(subjects).await
    }

    async fn create_students(&self, students: Vec<NewStudent>) -> Result<Vec<Student>> {
        self.create_students_impl(students).await
    }

    async fn create_grades(&self, grades: Vec<NewGrade>) -> Result<Vec<Grade>> {
        self.create_grades_impl(grades).await
    }

    // 统计查询模块
    async fn top_students_by_average(&self, limit: usize) -> Result<Vec<StudentAverage>> {
        self.top_students_by_average_impl(limit).await
    }

    async fn best_student_in_subject(
        &self,
        subject_name: &str,
    ) -> Result<Option<StudentAverage>> {
        self.best_student_in_subject_impl(subject_name).await
    }

    async fn group_averages_for_subject(&self, subject_name: &str) -> Result<Vec<GroupAverage>> {
        self.group_averages_for_subject_impl(subject_name).await
    }

    async fn overall_average(&self) -> Result<Option<f64>> {
        self.overall_average_impl().await
    }

    async fn subjects_taught_by(&self, teacher_name: &str) -> Result<Vec<String>> {
        self.subjects_taught_by_impl(teacher_name).await
    }

    async fn students_in_group(&self, group_name: &str) -> Result<Vec<String>> {
        self.students_in_group_impl(group_name).await
    }

    async fn grades_in_group_for_subject(
        &self,
        group_name: &str,
        subject_name: &str,
    ) -> Result<Vec<StudentGrade>> {
        self.grades_in_group_for_subject_impl(group_name, subject_name)
            .await
    }

    async fn teacher_average(&self, teacher_name: &str) -> Result<Option<f64>> {
        self.teacher_average_impl(teacher_name).await
    }

    async fn subjects_attended_by(&self, student_name: &str) -> Result<Vec<String>> {
        self.subjects_attended_by_impl(student_name).await
    }

    async fn subjects_taught_to(
        &self,
        student_name: &str,
        teacher_name: &str,
    ) -> Result<Vec<String>> {
        self.subjects_taught_to_impl(student_name, teacher_name)
            .await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            url: ":memory:".to_string(),
            pool_size: 1,
            timeout: 5,
            sqlx_logging: false,
        }
    }

    pub(crate) async fn memory_storage() -> SeaOrmStorage {
        let storage = SeaOrmStorage::new_async(&memory_config())
            .await
            .expect("in-memory storage should open");
        storage
            .ensure_schema()
            .await
            .expect("schema should be created");
        storage
    }

    /// 固定数据集：
    ///
    /// | 学生 | 分组 | 成绩 |
    /// | --- | --- | --- |
    /// | Anna Smith | Group A | Math 10, Math 8, History 6 |
    /// | Boris Young | Group A | Math 4 |
    /// | Clara Quinn | Group B | History 9, Physics 7 |
    /// | Dmytro Owens | Group B | (无) |
    /// | Eve Walker | 未分组 | Math 2 |
    ///
    /// Math、History 由 Mr. Smith 讲授，Physics 由 Ms. Parker 讲授。
    pub(crate) async fn fixture_storage() -> SeaOrmStorage {
        let storage = memory_storage().await;

        let groups = storage
            .create_groups_impl(vec![
                "Group A".to_string(),
                "Group B".to_string(),
                "Group C".to_string(),
            ])
            .await
            .unwrap();
        let teachers = storage
            .create_teachers_impl(vec!["Mr. Smith".to_string(), "Ms. Parker".to_string()])
            .await
            .unwrap();
        let subjects = storage
            .create_subjects_impl(vec![
                NewSubject {
                    subject_name: "Math".to_string(),
                    teacher_id: teachers[0].id,
                },
                NewSubject {
                    subject_name: "History".to_string(),
                    teacher_id: teachers[0].id,
                },
                NewSubject {
                    subject_name: "Physics".to_string(),
                    teacher_id: teachers[1].id,
                },
            ])
            .await
            .unwrap();
        let student = |fullname: &str, group_id: Option<i64>| NewStudent {
            fullname: fullname.to_string(),
            group_id,
        };
        let students = storage
            .create_students_impl(vec![
                student("Anna Smith", Some(groups[0].id)),
                student("Boris Young", Some(groups[0].id)),
                student("Clara Quinn", Some(groups[1].id)),
                student("Dmytro Owens", Some(groups[1].id)),
                student("Eve Walker", None),
            ])
            .await
            .unwrap();
        let grade = |value: i32, student: usize, subject: usize| NewGrade {
            value,
            student_id: students[student].id,
            subject_id: subjects[subject].id,
        };
        storage
            .create_grades_impl(vec![
                grade(10, 0, 0),
                grade(8, 0, 0),
                grade(6, 0, 1),
                grade(4, 1, 0),
                grade(9, 2, 1),
                grade(7, 2, 2),
                grade(2, 4, 0),
            ])
            .await
            .unwrap();

        storage
    }

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("students.db").unwrap(),
            "sqlite://students.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://localhost/school").unwrap(),
            "postgres://localhost/school"
        );
        let err = SeaOrmStorage::build_database_url("students.csv").unwrap_err();
        assert_eq!(err.code(), "E002");
    }

    #[test]
    fn test_sqlite_max_connections() {
        assert_eq!(SeaOrmStorage::sqlite_max_connections("sqlite::memory:", 4), 1);
        assert_eq!(
            SeaOrmStorage::sqlite_max_connections("sqlite://file:grades?mode=memory", 8),
            1
        );
        assert_eq!(
            SeaOrmStorage::sqlite_max_connections("sqlite://students.db?mode=rwc", 4),
            4
        );
        assert_eq!(
            SeaOrmStorage::sqlite_max_connections("sqlite://students.db?mode=rwc", 0),
            1
        );
    }

    #[tokio::test]
    async fn test_memory_database_ignores_pool_size() {
        let config = DatabaseConfig {
            pool_size: 4,
            ..memory_config()
        };
        let storage = SeaOrmStorage::new_async(&config).await.unwrap();
        storage.ensure_schema().await.unwrap();
        storage
            .create_groups_impl(vec!["Group A".to_string(), "Group B".to_string()])
            .await
            .unwrap();

        // 多次查询都落在同一个内存库上
        for _ in 0..4 {
            assert_eq!(storage.count_dataset_impl().await.unwrap().groups, 2);
        }
    }

    #[tokio::test]
    async fn test_ensure_schema_twice_keeps_data() {
        let storage = fixture_storage().await;
        let before = storage.count_dataset_impl().await.unwrap();

        storage.ensure_schema_impl().await.unwrap();
        storage.ensure_schema_impl().await.unwrap();

        let after = storage.count_dataset_impl().await.unwrap();
        assert_eq!(before, after);
        assert_eq!(after.grades, 7);
    }

    #[tokio::test]
    async fn test_top_students_by_average() {
        let storage = fixture_storage().await;
        let top = storage.top_students_by_average_impl(5).await.unwrap();

        // Dmytro 没有成绩，不出现在结果中
        let names: Vec<&str> = top.iter().map(|s| s.fullname.as_str()).collect();
        assert_eq!(
            names,
            vec!["Anna Smith", "Clara Quinn", "Boris Young", "Eve Walker"]
        );
        assert_eq!(top[0].avg_grade, 8.0);
        assert_eq!(top[1].avg_grade, 8.0);
        assert!(top.windows(2).all(|w| w[0].avg_grade >= w[1].avg_grade));

        let limited = storage.top_students_by_average_impl(2).await.unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn test_best_student_in_subject() {
        let storage = fixture_storage().await;

        let best = storage.best_student_in_subject_impl("Math").await.unwrap();
        assert_eq!(
            best,
            Some(StudentAverage {
                fullname: "Anna Smith".to_string(),
                avg_grade: 9.0,
            })
        );

        let none = storage
            .best_student_in_subject_impl("Chemistry")
            .await
            .unwrap();
        assert_eq!(none, None);
    }

    #[tokio::test]
    async fn test_group_averages_for_subject() {
        let storage = fixture_storage().await;

        // 未分组学生的 Math 成绩不计入任何分组
        let math = storage
            .group_averages_for_subject_impl("Math")
            .await
            .unwrap();
        assert_eq!(
            math,
            vec![GroupAverage {
                name: "Group A".to_string(),
                avg_grade: 7.33,
            }]
        );

        let history = storage
            .group_averages_for_subject_impl("History")
            .await
            .unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].name, "Group A");
        assert_eq!(history[0].avg_grade, 6.0);
        assert_eq!(history[1].name, "Group B");
        assert_eq!(history[1].avg_grade, 9.0);
    }

    #[tokio::test]
    async fn test_overall_average() {
        let storage = fixture_storage().await;
        // (10 + 8 + 6 + 4 + 9 + 7 + 2) / 7 = 6.571...
        assert_eq!(storage.overall_average_impl().await.unwrap(), Some(6.57));

        let empty = memory_storage().await;
        assert_eq!(empty.overall_average_impl().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_subjects_taught_by() {
        let storage = fixture_storage().await;
        assert_eq!(
            storage.subjects_taught_by_impl("Mr. Smith").await.unwrap(),
            vec!["Math".to_string(), "History".to_string()]
        );
        assert!(
            storage
                .subjects_taught_by_impl("Nobody Known")
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_students_in_group() {
        let storage = fixture_storage().await;
        assert_eq!(
            storage.students_in_group_impl("Group B").await.unwrap(),
            vec!["Clara Quinn".to_string(), "Dmytro Owens".to_string()]
        );
        // 存在但没有学生的分组
        assert!(
            storage
                .students_in_group_impl("Group C")
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_grades_in_group_for_subject() {
        let storage = fixture_storage().await;
        let grades = storage
            .grades_in_group_for_subject_impl("Group A", "Math")
            .await
            .unwrap();
        assert_eq!(
            grades,
            vec![
                StudentGrade {
                    fullname: "Anna Smith".to_string(),
                    value: 10,
                },
                StudentGrade {
                    fullname: "Anna Smith".to_string(),
                    value: 8,
                },
                StudentGrade {
                    fullname: "Boris Young".to_string(),
                    value: 4,
                },
            ]
        );
        assert!(
            storage
                .grades_in_group_for_subject_impl("Group B", "Math")
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_teacher_average() {
        let storage = fixture_storage().await;
        // Mr. Smith: 10, 8, 6, 4, 9, 2
        assert_eq!(
            storage.teacher_average_impl("Mr. Smith").await.unwrap(),
            Some(6.5)
        );
        assert_eq!(
            storage.teacher_average_impl("Ms. Parker").await.unwrap(),
            Some(7.0)
        );
        assert_eq!(storage.teacher_average_impl("Dr. Who").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_subjects_attended_by() {
        let storage = fixture_storage().await;
        // 两条 Math 成绩只返回一次
        assert_eq!(
            storage.subjects_attended_by_impl("Anna Smith").await.unwrap(),
            vec!["Math".to_string(), "History".to_string()]
        );
        assert!(
            storage
                .subjects_attended_by_impl("Dmytro Owens")
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_subjects_taught_to() {
        let storage = fixture_storage().await;
        assert_eq!(
            storage
                .subjects_taught_to_impl("Clara Quinn", "Mr. Smith")
                .await
                .unwrap(),
            vec!["History".to_string()]
        );
        assert_eq!(
            storage
                .subjects_taught_to_impl("Clara Quinn", "Ms. Parker")
                .await
                .unwrap(),
            vec!["Physics".to_string()]
        );
        assert!(
            storage
                .subjects_taught_to_impl("Boris Young", "Ms. Parker")
                .await
                .unwrap()
                .is_empty()
        );
    }
}
