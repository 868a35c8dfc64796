use serde::{Deserialize, Serialize};

/// 种子数据规模
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedPlan {
    pub groups: usize,
    pub teachers: usize,
    pub subjects: usize,
    pub students: usize,
    pub grades: usize,
    // 固定随机种子，便于复现
    pub rng_seed: Option<u64>,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            groups: 3,
            teachers: 5,
            subjects: 8,
            students: 30,
            grades: 20,
            rng_seed: None,
        }
    }
}
