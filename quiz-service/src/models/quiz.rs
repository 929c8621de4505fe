//! Request and response shapes for the quiz API.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Number of questions the prompt asks for.
pub const QUESTIONS_PER_QUIZ: usize = 3;

/// Number of answer options per question.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Body of `POST /api/generate-quiz`.
#[derive(Debug, Deserialize, Validate)]
pub struct QuizRequest {
    #[validate(length(min = 1))]
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// The schema the model is asked to produce.
///
/// Only checked when strict output validation is switched on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

impl QuizResponse {
    /// Check the shape the prompt asks for, returning the first violation.
    pub fn check(&self) -> Result<(), String> {
        if self.questions.len() != QUESTIONS_PER_QUIZ {
            return Err(format!(
                "expected {} questions, got {}",
                QUESTIONS_PER_QUIZ,
                self.questions.len()
            ));
        }

        for (index, question) in self.questions.iter().enumerate() {
            if question.options.len() != OPTIONS_PER_QUESTION {
                return Err(format!(
                    "question {} has {} options, expected {}",
                    index + 1,
                    question.options.len(),
                    OPTIONS_PER_QUESTION
                ));
            }
            if !question.options.contains(&question.correct_answer) {
                return Err(format!(
                    "question {} correct_answer is not one of its options",
                    index + 1
                ));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

impl HealthStatus {
    pub const fn ok() -> Self {
        Self { status: "ok" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer: &str) -> QuizQuestion {
        QuizQuestion {
            question_text: "Who founded Rome?".to_string(),
            options: vec![
                "Romulus".to_string(),
                "Caesar".to_string(),
                "Nero".to_string(),
                "Augustus".to_string(),
            ],
            correct_answer: answer.to_string(),
        }
    }

    #[test]
    fn empty_topic_fails_validation() {
        let request = QuizRequest {
            topic: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn whitespace_topic_passes_validation() {
        let request = QuizRequest {
            topic: " ".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn well_formed_quiz_passes_check() {
        let quiz = QuizResponse {
            questions: vec![question("Romulus"), question("Caesar"), question("Nero")],
        };
        assert_eq!(quiz.check(), Ok(()));
    }

    #[test]
    fn wrong_question_count_is_reported() {
        let quiz = QuizResponse {
            questions: vec![question("Romulus")],
        };
        assert_eq!(quiz.check(), Err("expected 3 questions, got 1".to_string()));
    }

    #[test]
    fn answer_outside_options_is_reported() {
        let quiz = QuizResponse {
            questions: vec![question("Romulus"), question("Remus"), question("Nero")],
        };
        assert_eq!(
            quiz.check(),
            Err("question 2 correct_answer is not one of its options".to_string())
        );
    }

    #[test]
    fn health_status_serializes_to_ok() {
        let json = serde_json::to_value(HealthStatus::ok()).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "ok" }));
    }
}
