pub mod names;
pub mod stats;
