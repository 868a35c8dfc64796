//! 平均分计算
//!
//! 查询层只负责按条件取出成绩行，平均值在这里统一计算并保留两位小数。

use std::collections::BTreeMap;

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 算术平均值，无数据时返回 None
pub fn mean(values: &[i32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().map(|&v| v as i64).sum();
    Some(round2(sum as f64 / values.len() as f64))
}

/// 按 ID 分组求平均分
///
/// 输入为 (id, 名称, 分值) 行，输出按 ID 升序，每个 ID 一行。
pub fn average_by_id<I>(rows: I) -> Vec<(i64, String, f64)>
where
    I: IntoIterator<Item = (i64, String, i32)>,
{
    let mut buckets: BTreeMap<i64, (String, Vec<i32>)> = BTreeMap::new();
    for (id, label, value) in rows {
        buckets
            .entry(id)
            .or_insert_with(|| (label, Vec::new()))
            .1
            .push(value);
    }

    buckets
        .into_iter()
        .filter_map(|(id, (label, values))| mean(&values).map(|avg| (id, label, avg)))
        .collect()
}

/// 按平均分降序排列，同分保持 ID 升序
pub fn rank_descending(rows: &mut [(i64, String, f64)]) {
    rows.sort_by(|a, b| b.2.total_cmp(&a.2));
}
