// src/definition.rs

use serde::Deserialize;

use crate::{
    api::RecruitingApi,
    error::AppError,
    models::{
        dsa::{Difficulty, TestCase},
        interview::InterviewCategory,
        quiz::{QuizOption, QuizType},
    },
    wizard::TestWizard,
};

/// A whole test described as JSON, replayed through the wizard step by step.
#[derive(Debug, Clone, Deserialize)]
pub struct TestDefinition {
    pub title: String,
    pub tech_field: String,
    pub description: String,
    #[serde(default)]
    pub dsa_questions: Vec<DsaDefinition>,
    #[serde(default)]
    pub quiz_questions: Vec<QuizDefinition>,
    #[serde(default)]
    pub interview_questions: Vec<InterviewDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DsaDefinition {
    pub question: String,
    pub difficulty: Difficulty,
    pub time_minutes: u32,
    pub test_cases: Vec<TestCase>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizDefinition {
    pub question: String,
    #[serde(rename = "type", default)]
    pub question_type: QuizType,
    pub time_seconds: u32,
    /// Four for single/multiple. Boolean takes none or `True`, `False` in that order.
    #[serde(default)]
    pub options: Vec<QuizOption>,
}

impl QuizDefinition {
    /// Rejects option lists the wizard could only store by altering them.
    fn check(&self) -> Result<(), String> {
        let correct = self.options.iter().filter(|o| o.correct).count();
        match self.question_type {
            QuizType::Single | QuizType::Multiple if self.options.len() != 4 => {
                return Err(format!("needs 4 options, got {}", self.options.len()));
            }
            QuizType::Single if correct > 1 => {
                return Err(format!("single choice with {} correct options", correct));
            }
            QuizType::Boolean => {
                if !self.options.is_empty() {
                    let labels: Vec<&str> = self.options.iter().map(|o| o.label.as_str()).collect();
                    if labels != ["True", "False"] {
                        return Err(format!("boolean options must be True, False; got {:?}", labels));
                    }
                }
                if correct > 1 {
                    return Err("boolean question with both answers correct".to_string());
                }
            }
            _ => {}
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterviewDefinition {
    pub question: String,
    #[serde(default)]
    pub category: InterviewCategory,
}

impl TestDefinition {
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw)
            .map_err(|e| AppError::Config(format!("Invalid test definition: {}", e)))
    }

    /// Structural checks the draft validators cannot see. Run before any request.
    pub fn check(&self) -> Result<(), AppError> {
        for (i, quiz) in self.quiz_questions.iter().enumerate() {
            quiz.check().map_err(|reason| {
                AppError::Config(format!(
                    "Quiz question {} ('{}'): {}",
                    i + 1,
                    quiz.question,
                    reason
                ))
            })?;
        }
        Ok(())
    }
}

/// Drives `wizard` from metadata to completion. Returns the test id.
///
/// Stops at the first failure; whatever was saved before it stays saved.
pub async fn author<A: RecruitingApi>(
    wizard: &mut TestWizard<A>,
    def: &TestDefinition,
) -> Result<i64, AppError> {
    def.check()?;
    wizard.edit_meta(|meta| {
        meta.title = def.title.clone();
        meta.tech_field = def.tech_field.clone();
        meta.description = def.description.clone();
    })?;
    wizard.advance().await?;

    for dsa in &def.dsa_questions {
        wizard.edit_dsa(|draft| {
            draft.question = dsa.question.clone();
            draft.difficulty = Some(dsa.difficulty);
            draft.time_minutes = dsa.time_minutes;
            draft.test_cases = dsa.test_cases.clone();
        })?;
        wizard.save_dsa_and_add().await?;
    }
    wizard.advance().await?;

    for quiz in &def.quiz_questions {
        wizard.edit_quiz(|draft| {
            draft.question = quiz.question.clone();
            draft.time_seconds = quiz.time_seconds;
            draft.set_type(quiz.question_type);
            for (i, option) in quiz.options.iter().enumerate() {
                draft.choices.set_label(i, option.label.clone());
                if option.correct {
                    draft.choices.set_correct(i, true);
                }
            }
        })?;
        wizard.save_quiz_and_add().await?;
    }
    wizard.advance().await?;

    for interview in &def.interview_questions {
        wizard.edit_interview(|draft| {
            draft.question = interview.question.clone();
            draft.category = interview.category;
        })?;
        wizard.save_interview_and_add().await?;
    }
    wizard.advance().await?;

    wizard
        .test_id()
        .ok_or_else(|| AppError::InvalidState("Wizard finished without a test id".to_string()))
}
