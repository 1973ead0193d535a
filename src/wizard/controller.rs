// src/wizard/controller.rs

use tracing::{error, info};
use validator::Validate;

use crate::{
    api::RecruitingApi,
    error::AppError,
    models::{
        dsa::DsaQuestionDraft, interview::InterviewQuestionDraft, quiz::QuizQuestionDraft,
        test::TestMeta,
    },
    wizard::{
        draft_store::{DraftKind, DraftStore},
        persistence::PersistenceAdapter,
        stage::Stage,
    },
};

pub const MSG_TEST_CREATED: &str = "Test created successfully!";

/// Side effects that must succeed, in order, before a transition completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    CreateTest,
    FlushDsa,
    FlushQuiz,
    FlushInterview,
    SubmitTest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: Stage,
    pub to: Stage,
    pub effects: Vec<Effect>,
}

/// Decides whether `stage` may be left forward and what must be persisted first.
///
/// Blank drafts are skipped; a draft with any input must validate.
pub fn plan_advance(stage: Stage, store: &DraftStore) -> Result<Transition, AppError> {
    let to = stage
        .next()
        .ok_or_else(|| AppError::InvalidState("The test is already complete".to_string()))?;

    let mut effects = Vec::new();
    match stage {
        Stage::Metadata => {
            store.meta().validate()?;
            if store.test_id().is_none() {
                effects.push(Effect::CreateTest);
            }
        }
        Stage::DsaQuestions => {
            store.require_test_id()?;
            if let Some(draft) = store.dsa.current_draft().filter(|d| !d.is_blank()) {
                draft.validate()?;
                effects.push(Effect::FlushDsa);
            }
        }
        Stage::QuizQuestions => {
            store.require_test_id()?;
            if let Some(draft) = store.quiz.current_draft().filter(|d| !d.is_blank()) {
                draft.validate()?;
                effects.push(Effect::FlushQuiz);
            }
        }
        Stage::InterviewQuestions => {
            store.require_test_id()?;
            if let Some(draft) = store.interview.current_draft().filter(|d| !d.is_blank()) {
                draft.validate()?;
                effects.push(Effect::FlushInterview);
            }
            effects.push(Effect::SubmitTest);
        }
        // Rejected above: Complete has no next stage.
        Stage::Complete => {}
    }

    Ok(Transition {
        from: stage,
        to,
        effects,
    })
}

/// Moves back one stage. Saved questions are kept.
pub fn retreat(stage: Stage) -> Result<Stage, AppError> {
    stage
        .previous()
        .ok_or_else(|| AppError::InvalidState(format!("Cannot go back from {}", stage)))
}

fn flush_failure(stage: Stage) -> &'static str {
    match stage {
        Stage::Metadata => "Failed to save test.",
        Stage::DsaQuestions => "Failed to save DSA questions.",
        Stage::QuizQuestions => "Failed to save quiz questions.",
        Stage::InterviewQuestions | Stage::Complete => "Failed to create test.",
    }
}

fn save_failure(kind: DraftKind) -> &'static str {
    match kind {
        DraftKind::Dsa => "Failed to save DSA question.",
        DraftKind::Quiz => "Failed to save quiz question.",
        DraftKind::Interview => "Failed to save interview question.",
    }
}

/// Headless test-authoring wizard.
///
/// Every network-bound operation takes `&mut self`, so at most one request
/// is in flight per wizard.
pub struct TestWizard<A> {
    persistence: PersistenceAdapter<A>,
    store: DraftStore,
    stage: Stage,
    message: Option<String>,
}

impl<A: RecruitingApi> TestWizard<A> {
    pub fn new(api: A) -> Self {
        Self {
            persistence: PersistenceAdapter::new(api),
            store: DraftStore::new(),
            stage: Stage::Metadata,
            message: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn store(&self) -> &DraftStore {
        &self.store
    }

    pub fn test_id(&self) -> Option<i64> {
        self.store.test_id()
    }

    /// Stage-scoped status line (last failure or completion notice).
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn edit_meta<F: FnOnce(&mut TestMeta)>(&mut self, patch: F) -> Result<(), AppError> {
        self.require_stage(Stage::Metadata)?;
        self.store.update_meta(patch)
    }

    pub fn edit_dsa<F: FnOnce(&mut DsaQuestionDraft)>(&mut self, patch: F) -> Result<(), AppError> {
        self.require_stage(Stage::DsaQuestions)?;
        edited(self.store.dsa.update_current_draft(patch), DraftKind::Dsa)
    }

    pub fn edit_quiz<F: FnOnce(&mut QuizQuestionDraft)>(&mut self, patch: F) -> Result<(), AppError> {
        self.require_stage(Stage::QuizQuestions)?;
        edited(self.store.quiz.update_current_draft(patch), DraftKind::Quiz)
    }

    pub fn edit_interview<F: FnOnce(&mut InterviewQuestionDraft)>(
        &mut self,
        patch: F,
    ) -> Result<(), AppError> {
        self.require_stage(Stage::InterviewQuestions)?;
        edited(self.store.interview.update_current_draft(patch), DraftKind::Interview)
    }

    /// "Save & add": persists the open DSA draft and opens a fresh one.
    pub async fn save_dsa_and_add(&mut self) -> Result<i64, AppError> {
        self.require_stage(Stage::DsaQuestions)?;
        let test_id = self.store.require_test_id()?;
        let draft = open_draft(self.store.dsa.current_draft(), DraftKind::Dsa)?;
        draft.validate()?;

        let result = self.persistence.create_dsa_question(test_id, draft).await;
        match result {
            Ok(id) => {
                self.store.dsa.mark_saved(id);
                self.store.dsa.append_draft();
                self.message = None;
                Ok(id)
            }
            Err(e) => Err(self.fail(save_failure(DraftKind::Dsa), e)),
        }
    }

    pub async fn save_quiz_and_add(&mut self) -> Result<i64, AppError> {
        self.require_stage(Stage::QuizQuestions)?;
        let test_id = self.store.require_test_id()?;
        let draft = open_draft(self.store.quiz.current_draft(), DraftKind::Quiz)?;
        draft.validate()?;

        let result = self.persistence.create_quiz_question(test_id, draft).await;
        match result {
            Ok(id) => {
                self.store.quiz.mark_saved(id);
                self.store.quiz.append_draft();
                self.message = None;
                Ok(id)
            }
            Err(e) => Err(self.fail(save_failure(DraftKind::Quiz), e)),
        }
    }

    pub async fn save_interview_and_add(&mut self) -> Result<i64, AppError> {
        self.require_stage(Stage::InterviewQuestions)?;
        let test_id = self.store.require_test_id()?;
        let draft = open_draft(self.store.interview.current_draft(), DraftKind::Interview)?;
        draft.validate()?;

        let result = self.persistence.create_interview_question(test_id, draft).await;
        match result {
            Ok(id) => {
                self.store.interview.mark_saved(id);
                self.store.interview.append_draft();
                self.message = None;
                Ok(id)
            }
            Err(e) => Err(self.fail(save_failure(DraftKind::Interview), e)),
        }
    }

    /// Moves to the next stage after flushing what the current stage holds.
    ///
    /// Validation failures leave the message untouched; persistence failures
    /// set it and keep the wizard on the current stage.
    pub async fn advance(&mut self) -> Result<Stage, AppError> {
        let transition = plan_advance(self.stage, &self.store)?;

        for effect in &transition.effects {
            let result = self.run(*effect).await;
            if let Err(e) = result {
                return Err(self.fail(flush_failure(transition.from), e));
            }
        }

        self.stage = transition.to;
        self.message = if self.stage == Stage::Complete {
            Some(MSG_TEST_CREATED.to_string())
        } else {
            None
        };
        info!("Wizard moved from {} to {}", transition.from, transition.to);
        Ok(self.stage)
    }

    pub fn retreat(&mut self) -> Result<Stage, AppError> {
        self.stage = retreat(self.stage)?;
        self.message = None;
        Ok(self.stage)
    }

    async fn run(&mut self, effect: Effect) -> Result<(), AppError> {
        match effect {
            Effect::CreateTest => {
                let id = self.persistence.create_test(self.store.meta()).await?;
                self.store.assign_test_id(id)?;
            }
            Effect::FlushDsa => {
                let test_id = self.store.require_test_id()?;
                let id = match self.store.dsa.current_draft() {
                    Some(draft) => self.persistence.create_dsa_question(test_id, draft).await?,
                    None => return Ok(()),
                };
                self.store.dsa.mark_saved(id);
                self.store.dsa.append_draft();
            }
            Effect::FlushQuiz => {
                let test_id = self.store.require_test_id()?;
                let id = match self.store.quiz.current_draft() {
                    Some(draft) => self.persistence.create_quiz_question(test_id, draft).await?,
                    None => return Ok(()),
                };
                self.store.quiz.mark_saved(id);
                self.store.quiz.append_draft();
            }
            Effect::FlushInterview => {
                let test_id = self.store.require_test_id()?;
                let id = match self.store.interview.current_draft() {
                    Some(draft) => self.persistence.create_interview_question(test_id, draft).await?,
                    None => return Ok(()),
                };
                self.store.interview.mark_saved(id);
                self.store.interview.append_draft();
            }
            Effect::SubmitTest => {
                self.persistence.submit_test(&self.store).await?;
            }
        }
        Ok(())
    }

    fn require_stage(&self, expected: Stage) -> Result<(), AppError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(AppError::InvalidState(format!(
                "Wizard is at {}, not {}",
                self.stage, expected
            )))
        }
    }

    fn fail(&mut self, message: &str, err: AppError) -> AppError {
        error!("{} ({})", message, err);
        self.message = Some(message.to_string());
        err
    }
}

fn open_draft<T>(draft: Option<&T>, kind: DraftKind) -> Result<&T, AppError> {
    draft.ok_or_else(|| AppError::InvalidState(format!("No open {} draft", kind)))
}

fn edited(applied: bool, kind: DraftKind) -> Result<(), AppError> {
    if applied {
        Ok(())
    } else {
        Err(AppError::InvalidState(format!("No open {} draft", kind)))
    }
}
