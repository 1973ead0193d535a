// src/models/interview.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewCategory {
    #[default]
    General,
    Technical,
    Behavioral,
    ProblemSolving,
}

/// The AI-interview question currently being edited in the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct InterviewQuestionDraft {
    #[validate(length(min = 1, message = "Question is required."))]
    pub question: String,

    pub category: InterviewCategory,
}

impl InterviewQuestionDraft {
    /// The category alone does not make a draft worth saving.
    pub fn is_blank(&self) -> bool {
        self.question.is_empty()
    }

    pub fn to_request(&self, test_id: i64) -> Result<CreateInterviewQuestionRequest, AppError> {
        self.validate()?;
        Ok(CreateInterviewQuestionRequest {
            edudiagno_test_id: test_id,
            question: self.question.clone(),
            category: self.category,
        })
    }
}

/// DTO for `POST /admin/interview-questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInterviewQuestionRequest {
    pub edudiagno_test_id: i64,
    pub question: String,
    pub category: InterviewCategory,
}
