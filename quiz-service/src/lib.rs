//! quiz-service: turns a topic into a multiple-choice quiz via Google Gemini.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{build_router, AppState};
