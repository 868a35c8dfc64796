//! 种子数据生成
//!
//! 每类实体生成后作为一个批次写入，失败时该批次整体回滚，之前的批次保持提交。
//! 重复调用会继续追加数据。

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::{GradebookError, Result};
use crate::models::seed::{requests::SeedPlan, responses::SeedSummary};
use crate::storage::{NewGrade, NewStudent, NewSubject, Storage};
use crate::utils::names::random_fullname;

/// 种子成绩的取值范围，库表本身不约束
pub const GRADE_RANGE: RangeInclusive<i32> = 1..=10;

pub struct SeedService {
    storage: Arc<dyn Storage>,
}

impl SeedService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 按计划写入全部种子数据
    pub async fn seed(&self, plan: &SeedPlan) -> Result<SeedSummary> {
        let mut rng = match plan.rng_seed {
            Some(seed) => {
                debug!("Seeding with fixed rng seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        let groups = self
            .storage
            .create_groups((1..=plan.groups).map(|i| format!("Group {i}")).collect())
            .await?;

        let teachers = self
            .storage
            .create_teachers(
                (0..plan.teachers)
                    .map(|_| random_fullname(&mut rng))
                    .collect(),
            )
            .await?;

        if plan.subjects > 0 && teachers.is_empty() {
            return Err(GradebookError::seed("subjects need at least one teacher"));
        }
        let mut new_subjects = Vec::with_capacity(plan.subjects);
        for i in 1..=plan.subjects {
            if let Some(teacher) = teachers.choose(&mut rng) {
                new_subjects.push(NewSubject {
                    subject_name: format!("Subject {i}"),
                    teacher_id: teacher.id,
                });
            }
        }
        let subjects = self.storage.create_subjects(new_subjects).await?;

        // 没有分组时学生保持未分组
        let new_students = (0..plan.students)
            .map(|_| {
                let fullname = random_fullname(&mut rng);
                let group_id = groups.choose(&mut rng).map(|g| g.id);
                NewStudent { fullname, group_id }
            })
            .collect();
        let students = self.storage.create_students(new_students).await?;

        if plan.grades > 0 && (students.is_empty() || subjects.is_empty()) {
            return Err(GradebookError::seed(
                "grades need at least one student and one subject",
            ));
        }
        let mut new_grades = Vec::with_capacity(plan.grades);
        for _ in 0..plan.grades {
            let value = rng.random_range(GRADE_RANGE);
            if let (Some(student), Some(subject)) =
                (students.choose(&mut rng), subjects.choose(&mut rng))
            {
                new_grades.push(NewGrade {
                    value,
                    student_id: student.id,
                    subject_id: subject.id,
                });
            }
        }
        let grades = self.storage.create_grades(new_grades).await?;

        info!(
            "Seeded {} groups, {} teachers, {} subjects, {} students, {} grades",
            groups.len(),
            teachers.len(),
            subjects.len(),
            students.len(),
            grades.len()
        );

        Ok(SeedSummary {
            groups,
            teachers,
            subjects,
            students,
            grades,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::seed::responses::DatasetCounts;
    use crate::storage::sea_orm_storage::tests::memory_storage;
    use std::collections::HashSet;

    fn fixed_plan(seed: u64) -> SeedPlan {
        SeedPlan {
            rng_seed: Some(seed),
            ..SeedPlan::default()
        }
    }

    #[tokio::test]
    async fn test_default_plan_row_counts() {
        let storage = Arc::new(memory_storage().await);
        let summary = SeedService::new(storage.clone())
            .seed(&fixed_plan(1))
            .await
            .unwrap();

        assert_eq!(summary.groups.len(), 3);
        assert_eq!(summary.teachers.len(), 5);
        assert_eq!(summary.subjects.len(), 8);
        assert_eq!(summary.students.len(), 30);
        assert_eq!(summary.grades.len(), 20);
        assert_eq!(
            storage.count_dataset().await.unwrap(),
            DatasetCounts {
                groups: 3,
                teachers: 5,
                subjects: 8,
                students: 30,
                grades: 20,
            }
        );

        let group_names: Vec<&str> = summary.groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(group_names, vec!["Group 1", "Group 2", "Group 3"]);
        assert_eq!(summary.subjects[7].subject_name, "Subject 8");
    }

    #[tokio::test]
    async fn test_references_point_to_existing_rows() {
        let storage = Arc::new(memory_storage().await);
        let summary = SeedService::new(storage)
            .seed(&fixed_plan(2))
            .await
            .unwrap();

        let group_ids: HashSet<i64> = summary.groups.iter().map(|g| g.id).collect();
        let teacher_ids: HashSet<i64> = summary.teachers.iter().map(|t| t.id).collect();
        let subject_ids: HashSet<i64> = summary.subjects.iter().map(|s| s.id).collect();
        let student_ids: HashSet<i64> = summary.students.iter().map(|s| s.id).collect();

        assert!(
            summary
                .subjects
                .iter()
                .all(|s| teacher_ids.contains(&s.teacher_id))
        );
        assert!(
            summary
                .students
                .iter()
                .all(|s| s.group_id.is_some_and(|id| group_ids.contains(&id)))
        );
        for grade in &summary.grades {
            assert!(student_ids.contains(&grade.student_id));
            assert!(subject_ids.contains(&grade.subject_id));
            assert!(GRADE_RANGE.contains(&grade.value));
        }
    }

    #[tokio::test]
    async fn test_overall_average_matches_seeded_values() {
        let storage = Arc::new(memory_storage().await);
        let summary = SeedService::new(storage.clone())
            .seed(&fixed_plan(3))
            .await
            .unwrap();

        let sum: i32 = summary.grades.iter().map(|g| g.value).sum();
        let expected = crate::utils::stats::round2(sum as f64 / 20.0);
        assert_eq!(storage.overall_average().await.unwrap(), Some(expected));
    }

    #[tokio::test]
    async fn test_same_seed_same_data() {
        let left = SeedService::new(Arc::new(memory_storage().await))
            .seed(&fixed_plan(99))
            .await
            .unwrap();
        let right = SeedService::new(Arc::new(memory_storage().await))
            .seed(&fixed_plan(99))
            .await
            .unwrap();

        assert_eq!(left.teachers, right.teachers);
        assert_eq!(left.students, right.students);
        assert_eq!(left.grades, right.grades);
    }

    #[tokio::test]
    async fn test_seeding_twice_appends() {
        let storage = Arc::new(memory_storage().await);
        let service = SeedService::new(storage.clone());
        service.seed(&fixed_plan(4)).await.unwrap();
        service.seed(&fixed_plan(5)).await.unwrap();

        let counts = storage.count_dataset().await.unwrap();
        assert_eq!(counts.groups, 6);
        assert_eq!(counts.grades, 40);
    }

    #[tokio::test]
    async fn test_grades_without_subjects_is_an_error() {
        let storage = Arc::new(memory_storage().await);
        let plan = SeedPlan {
            teachers: 0,
            subjects: 0,
            ..fixed_plan(6)
        };
        let err = SeedService::new(storage).seed(&plan).await.unwrap_err();
        assert_eq!(err.code(), "E006");
    }
}
