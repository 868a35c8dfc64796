//! 示例查询执行
//!
//! 依次执行十个统计查询，每个结果集输出为一行 `Select N: <json>`。

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::config::QueryParams;
use crate::errors::Result;
use crate::models::seed::responses::SeedSummary;
use crate::storage::Storage;

/// 查询 1 返回的学生数
pub const TOP_STUDENTS_LIMIT: usize = 5;

/// 一个查询的输出
#[derive(Debug, Clone)]
pub struct ReportLine {
    pub index: usize,
    pub body: serde_json::Value,
}

impl ReportLine {
    fn new<T: Serialize>(index: usize, rows: &T) -> Result<Self> {
        Ok(Self {
            index,
            body: serde_json::to_value(rows)?,
        })
    }

    pub fn render(&self) -> String {
        format!("Select {}: {}", self.index, self.body)
    }
}

/// 补全示例查询参数
///
/// 空值以本次写入的第一条成绩为准：取该成绩的学生及其分组、课程及其授课教师，
/// 这样各查询都能命中数据。没有成绩时退回各表的第一条记录。
pub fn resolve_params(params: &QueryParams, summary: &SeedSummary) -> QueryParams {
    fn pick(configured: &str, seeded: Option<&String>) -> String {
        if configured.is_empty() {
            seeded.cloned().unwrap_or_default()
        } else {
            configured.to_string()
        }
    }

    let anchor = summary.grades.first();
    let student = anchor
        .and_then(|g| summary.students.iter().find(|s| s.id == g.student_id))
        .or(summary.students.first());
    let subject = anchor
        .and_then(|g| summary.subjects.iter().find(|s| s.id == g.subject_id))
        .or(summary.subjects.first());
    let group = student
        .and_then(|s| s.group_id)
        .and_then(|id| summary.groups.iter().find(|g| g.id == id))
        .or(summary.groups.first());
    let teacher = subject
        .and_then(|s| summary.teachers.iter().find(|t| t.id == s.teacher_id))
        .or(summary.teachers.first());

    QueryParams {
        subject: pick(&params.subject, subject.map(|s| &s.subject_name)),
        group: pick(&params.group, group.map(|g| &g.name)),
        teacher: pick(&params.teacher, teacher.map(|t| &t.fullname)),
        student: pick(&params.student, student.map(|s| &s.fullname)),
    }
}

pub struct ReportService {
    storage: Arc<dyn Storage>,
}

impl ReportService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// 依次执行全部查询
    pub async fn run_all(&self, params: &QueryParams) -> Result<Vec<ReportLine>> {
        debug!("Running reports with {:?}", params);
        let storage = &self.storage;

        Ok(vec![
            ReportLine::new(
                1,
                &storage.top_students_by_average(TOP_STUDENTS_LIMIT).await?,
            )?,
            ReportLine::new(
                2,
                &storage.best_student_in_subject(&params.subject).await?,
            )?,
            ReportLine::new(
                3,
                &storage.group_averages_for_subject(&params.subject).await?,
            )?,
            ReportLine::new(4, &storage.overall_average().await?)?,
            ReportLine::new(5, &storage.subjects_taught_by(&params.teacher).await?)?,
            ReportLine::new(6, &storage.students_in_group(&params.group).await?)?,
            ReportLine::new(
                7,
                &storage
                    .grades_in_group_for_subject(&params.group, &params.subject)
                    .await?,
            )?,
            ReportLine::new(8, &storage.teacher_average(&params.teacher).await?)?,
            ReportLine::new(
                9,
                &storage.subjects_attended_by(&params.student).await?,
            )?,
            ReportLine::new(
                10,
                &storage
                    .subjects_taught_to(&params.student, &params.teacher)
                    .await?,
            )?,
        ])
    }
}
