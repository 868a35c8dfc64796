pub mod reports;
pub mod seeder;

pub use reports::ReportService;
pub use seeder::SeedService;
