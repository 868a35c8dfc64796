//! 随机姓名生成

use rand::Rng;
use rand::seq::IndexedRandom;

const FIRST_NAMES: &[&str] = &[
    "Alice", "Andrew", "Anna", "Benjamin", "Catherine", "Daniel", "Diana", "Edward", "Elena",
    "Frank", "Grace", "Henry", "Irene", "James", "Julia", "Kevin", "Laura", "Michael", "Natalie",
    "Oliver", "Olga", "Peter", "Rachel", "Samuel", "Sofia", "Thomas", "Victoria", "William",
];

const LAST_NAMES: &[&str] = &[
    "Anderson", "Bennett", "Carter", "Davies", "Evans", "Fischer", "Garcia", "Hughes", "Ivanenko",
    "Johnson", "Kowalski", "Lopez", "Miller", "Nelson", "Owens", "Parker", "Quinn", "Roberts",
    "Smith", "Taylor", "Turner", "Walker", "Wilson", "Young",
];

/// 生成 "名 姓" 形式的随机姓名
pub fn random_fullname<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
    format!("{first} {last}")
}
