#![forbid(unsafe_code)]

pub mod challenges;
pub mod error;
pub mod options;
pub mod seeder;

pub use challenges::{PlannedChallenge, plan_challenges};
pub use error::SeedError;
pub use options::build_options;
pub use seeder::{CourseSeeder, SeedReport};
