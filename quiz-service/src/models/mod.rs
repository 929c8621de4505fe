pub mod quiz;

pub use quiz::{HealthStatus, QuizQuestion, QuizRequest, QuizResponse};
