// src/wizard/draft_store.rs

use std::fmt;

use crate::{
    error::AppError,
    models::{
        dsa::DsaQuestionDraft, interview::InterviewQuestionDraft, quiz::QuizQuestionDraft,
        test::TestMeta,
    },
};

/// The three question collections of a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftKind {
    Dsa,
    Quiz,
    Interview,
}

impl fmt::Display for DraftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DraftKind::Dsa => "DSA question",
            DraftKind::Quiz => "quiz question",
            DraftKind::Interview => "interview question",
        };
        f.write_str(name)
    }
}

/// An item confirmed by the Recruiting API. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved<T> {
    pub server_id: i64,
    pub item: T,
}

/// Saved items in authoring order plus at most one editable draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    saved: Vec<Saved<T>>,
    draft: Option<T>,
}

impl<T: Default> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default> Collection<T> {
    /// Starts with one empty draft and nothing saved.
    pub fn new() -> Self {
        Self {
            saved: Vec::new(),
            draft: Some(T::default()),
        }
    }

    /// Opens a fresh draft, or returns the one already open.
    pub fn append_draft(&mut self) -> &mut T {
        self.draft.get_or_insert_with(T::default)
    }
}

impl<T> Collection<T> {
    /// Applies `patch` to the open draft. Returns false when none is open.
    pub fn update_current_draft<F>(&mut self, patch: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        match self.draft.as_mut() {
            Some(draft) => {
                patch(draft);
                true
            }
            None => false,
        }
    }

    /// Moves the open draft to the end of the saved list.
    pub fn mark_saved(&mut self, server_id: i64) -> Option<&Saved<T>> {
        let item = self.draft.take()?;
        self.saved.push(Saved { server_id, item });
        self.saved.last()
    }

    pub fn list_saved(&self) -> &[Saved<T>] {
        &self.saved
    }

    pub fn current_draft(&self) -> Option<&T> {
        self.draft.as_ref()
    }
}

/// Everything the wizard holds for one test while it is being authored.
#[derive(Debug, Clone, Default)]
pub struct DraftStore {
    meta: TestMeta,
    test_id: Option<i64>,
    pub dsa: Collection<DsaQuestionDraft>,
    pub quiz: Collection<QuizQuestionDraft>,
    pub interview: Collection<InterviewQuestionDraft>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meta(&self) -> &TestMeta {
        &self.meta
    }

    /// Metadata is frozen once the test exists server-side.
    pub fn update_meta<F>(&mut self, patch: F) -> Result<(), AppError>
    where
        F: FnOnce(&mut TestMeta),
    {
        if let Some(id) = self.test_id {
            return Err(AppError::InvalidState(format!(
                "Test {} is already saved; its metadata can no longer change",
                id
            )));
        }
        patch(&mut self.meta);
        Ok(())
    }

    pub fn test_id(&self) -> Option<i64> {
        self.test_id
    }

    pub fn assign_test_id(&mut self, id: i64) -> Result<(), AppError> {
        match self.test_id {
            Some(existing) => Err(AppError::InvalidState(format!(
                "Test id already assigned ({})",
                existing
            ))),
            None => {
                self.test_id = Some(id);
                Ok(())
            }
        }
    }

    /// Test id, or the error for persisting a child before the test exists.
    pub fn require_test_id(&self) -> Result<i64, AppError> {
        self.test_id.ok_or_else(|| {
            AppError::InvalidState("Questions cannot be saved before the test exists".to_string())
        })
    }
}
