// src/models/quiz.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// Quiz question type. Serialized as `single`, `multiple` or `boolean`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizType {
    #[default]
    Single,
    Multiple,
    Boolean,
}

impl fmt::Display for QuizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuizType::Single => "single",
            QuizType::Multiple => "multiple",
            QuizType::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub label: String,
    pub correct: bool,
}

impl QuizOption {
    pub fn new(label: impl Into<String>, correct: bool) -> Self {
        Self {
            label: label.into(),
            correct,
        }
    }
}

/// Option set of a quiz question, shaped by its type.
///
/// Single and multiple choice always hold four options; boolean questions
/// hold only which of the fixed `True`/`False` pair is correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizChoices {
    Single([QuizOption; 4]),
    Multiple([QuizOption; 4]),
    Boolean { answer: Option<bool> },
}

impl Default for QuizChoices {
    fn default() -> Self {
        Self::empty(QuizType::default())
    }
}

impl QuizChoices {
    pub fn empty(kind: QuizType) -> Self {
        match kind {
            QuizType::Single => QuizChoices::Single(Default::default()),
            QuizType::Multiple => QuizChoices::Multiple(Default::default()),
            QuizType::Boolean => QuizChoices::Boolean { answer: None },
        }
    }

    pub fn kind(&self) -> QuizType {
        match self {
            QuizChoices::Single(_) => QuizType::Single,
            QuizChoices::Multiple(_) => QuizType::Multiple,
            QuizChoices::Boolean { .. } => QuizType::Boolean,
        }
    }

    /// Options in display and submission order.
    pub fn options(&self) -> Vec<QuizOption> {
        match self {
            QuizChoices::Single(options) | QuizChoices::Multiple(options) => options.to_vec(),
            QuizChoices::Boolean { answer } => vec![
                QuizOption::new("True", *answer == Some(true)),
                QuizOption::new("False", *answer == Some(false)),
            ],
        }
    }

    /// Boolean labels are fixed, so writes to them are dropped.
    pub fn set_label(&mut self, index: usize, label: impl Into<String>) {
        match self {
            QuizChoices::Single(options) | QuizChoices::Multiple(options) => {
                if let Some(option) = options.get_mut(index) {
                    option.label = label.into();
                }
            }
            QuizChoices::Boolean { .. } => {}
        }
    }

    /// Single and boolean behave like radio buttons: marking one option
    /// unmarks every other. Multiple choice toggles independently.
    pub fn set_correct(&mut self, index: usize, correct: bool) {
        match self {
            QuizChoices::Single(options) => {
                if index >= options.len() {
                    return;
                }
                if correct {
                    for (i, option) in options.iter_mut().enumerate() {
                        option.correct = i == index;
                    }
                } else {
                    options[index].correct = false;
                }
            }
            QuizChoices::Multiple(options) => {
                if let Some(option) = options.get_mut(index) {
                    option.correct = correct;
                }
            }
            QuizChoices::Boolean { answer } => {
                let value = match index {
                    0 => true,
                    1 => false,
                    _ => return,
                };
                if correct {
                    *answer = Some(value);
                } else if *answer == Some(value) {
                    *answer = None;
                }
            }
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            QuizChoices::Single(options) | QuizChoices::Multiple(options) => options
                .iter()
                .all(|option| option.label.is_empty() && !option.correct),
            QuizChoices::Boolean { answer } => answer.is_none(),
        }
    }
}

fn validate_choices(choices: &QuizChoices) -> Result<(), ValidationError> {
    let options = choices.options();
    if options.iter().any(|option| option.label.is_empty()) {
        return Err(ValidationError::new("option_label_required")
            .with_message("Every option needs a label.".into()));
    }
    let correct = options.iter().filter(|option| option.correct).count();
    match choices {
        QuizChoices::Single(_) | QuizChoices::Boolean { .. } if correct != 1 => {
            Err(ValidationError::new("exactly_one_correct")
                .with_message("Mark exactly one option as correct.".into()))
        }
        _ => Ok(()),
    }
}

/// The quiz question currently being edited in the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct QuizQuestionDraft {
    #[validate(length(min = 1, message = "Question is required."))]
    pub question: String,

    /// Zero until the author enters a value.
    #[validate(range(min = 1, message = "Time must be at least one second."))]
    pub time_seconds: u32,

    #[validate(custom(function = validate_choices))]
    pub choices: QuizChoices,
}

impl QuizQuestionDraft {
    pub fn kind(&self) -> QuizType {
        self.choices.kind()
    }

    /// Switching type discards the options entered so far.
    pub fn set_type(&mut self, kind: QuizType) {
        if self.choices.kind() != kind {
            self.choices = QuizChoices::empty(kind);
        }
    }

    pub fn is_blank(&self) -> bool {
        self.question.is_empty() && self.time_seconds == 0 && self.choices.is_blank()
    }

    /// Validates and builds the question body; options go out separately
    /// once the question id is known.
    pub fn to_request(&self, test_id: i64) -> Result<CreateQuizQuestionRequest, AppError> {
        self.validate()?;
        Ok(CreateQuizQuestionRequest {
            edudiagno_test_id: test_id,
            question: self.question.clone(),
            question_type: self.kind(),
            time_seconds: self.time_seconds,
        })
    }
}

/// DTO for `POST /admin/quiz-questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQuizQuestionRequest {
    pub edudiagno_test_id: i64,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuizType,
    pub time_seconds: u32,
}

/// DTO for `POST /admin/quiz-options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateQuizOptionRequest {
    pub label: String,
    pub correct: bool,
    pub question_id: i64,
}

/// A saved quiz question inside the final test submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSubmission {
    #[serde(flatten)]
    pub question: CreateQuizQuestionRequest,
    pub options: Vec<QuizOption>,
}
