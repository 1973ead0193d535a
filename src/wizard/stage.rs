// src/wizard/stage.rs

use std::fmt;

/// Steps of the authoring wizard, in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    #[default]
    Metadata,
    DsaQuestions,
    QuizQuestions,
    InterviewQuestions,
    Complete,
}

impl Stage {
    /// Zero-based step number as shown to the author.
    pub fn index(self) -> u8 {
        match self {
            Stage::Metadata => 0,
            Stage::DsaQuestions => 1,
            Stage::QuizQuestions => 2,
            Stage::InterviewQuestions => 3,
            Stage::Complete => 4,
        }
    }

    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Metadata => Some(Stage::DsaQuestions),
            Stage::DsaQuestions => Some(Stage::QuizQuestions),
            Stage::QuizQuestions => Some(Stage::InterviewQuestions),
            Stage::InterviewQuestions => Some(Stage::Complete),
            Stage::Complete => None,
        }
    }

    /// `Complete` is terminal and has no way back.
    pub fn previous(self) -> Option<Stage> {
        match self {
            Stage::Metadata | Stage::Complete => None,
            Stage::DsaQuestions => Some(Stage::Metadata),
            Stage::QuizQuestions => Some(Stage::DsaQuestions),
            Stage::InterviewQuestions => Some(Stage::QuizQuestions),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Metadata => "metadata",
            Stage::DsaQuestions => "DSA questions",
            Stage::QuizQuestions => "quiz questions",
            Stage::InterviewQuestions => "AI interview questions",
            Stage::Complete => "complete",
        };
        f.write_str(name)
    }
}
