// src/models/dsa.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub output: String,
}

impl TestCase {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.input.is_empty() && self.output.is_empty()
    }
}

/// The DSA question currently being edited in the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct DsaQuestionDraft {
    #[validate(length(min = 1, message = "Question is required."))]
    pub question: String,

    #[validate(required(message = "Select a difficulty."))]
    pub difficulty: Option<Difficulty>,

    /// Zero until the author enters a value.
    #[validate(range(min = 1, message = "Time must be at least one minute."))]
    pub time_minutes: u32,

    #[validate(custom(function = validate_test_cases))]
    pub test_cases: Vec<TestCase>,
}

impl Default for DsaQuestionDraft {
    /// An empty question always starts with one empty test case.
    fn default() -> Self {
        Self {
            question: String::new(),
            difficulty: None,
            time_minutes: 0,
            test_cases: vec![TestCase::default()],
        }
    }
}

impl DsaQuestionDraft {
    pub fn add_test_case(&mut self) {
        self.test_cases.push(TestCase::default());
    }

    pub fn remove_test_case(&mut self, index: usize) -> Option<TestCase> {
        if index < self.test_cases.len() {
            Some(self.test_cases.remove(index))
        } else {
            None
        }
    }

    /// True while nothing has been typed into the draft.
    pub fn is_blank(&self) -> bool {
        self.question.is_empty()
            && self.difficulty.is_none()
            && self.time_minutes == 0
            && self.test_cases.iter().all(TestCase::is_blank)
    }

    /// Validates and builds the `POST /admin/dsa-questions` body.
    pub fn to_request(&self, test_id: i64) -> Result<CreateDsaQuestionRequest, AppError> {
        self.validate()?;
        let difficulty = self
            .difficulty
            .ok_or_else(|| AppError::InvalidState("difficulty missing after validation".to_string()))?;

        Ok(CreateDsaQuestionRequest {
            edudiagno_test_id: test_id,
            title: self.question.clone(),
            description: String::new(),
            difficulty,
            time_minutes: self.time_minutes,
            test_cases: self.test_cases.clone(),
        })
    }
}

#[allow(clippy::ptr_arg)]
fn validate_test_cases(test_cases: &Vec<TestCase>) -> Result<(), ValidationError> {
    if test_cases.is_empty() {
        return Err(ValidationError::new("test_cases_cannot_be_empty")
            .with_message("At least one test case is required.".into()));
    }
    for case in test_cases {
        if case.input.is_empty() || case.output.is_empty() {
            return Err(ValidationError::new("test_case_incomplete")
                .with_message("Every test case needs an input and an expected output.".into()));
        }
    }
    Ok(())
}

/// DTO for `POST /admin/dsa-questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDsaQuestionRequest {
    pub edudiagno_test_id: i64,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub time_minutes: u32,
    pub test_cases: Vec<TestCase>,
}
