pub mod metrics;
pub mod providers;
pub mod quiz;

pub use quiz::QuizGenerator;
