pub mod config;
pub mod error;
pub mod quizzes;
pub mod telemetry;
