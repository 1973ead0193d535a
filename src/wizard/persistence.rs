// src/wizard/persistence.rs

use tracing::{info, warn};

use crate::{
    api::RecruitingApi,
    error::AppError,
    models::{
        dsa::DsaQuestionDraft,
        interview::InterviewQuestionDraft,
        quiz::{CreateQuizOptionRequest, QuizQuestionDraft, QuizSubmission},
        test::{SubmitTestRequest, TestMeta},
    },
    wizard::draft_store::DraftStore,
};

/// Turns drafts into Recruiting API create calls.
///
/// Each call is awaited before the next one is issued. Nothing is rolled back
/// when a later call fails.
pub struct PersistenceAdapter<A> {
    api: A,
}

impl<A: RecruitingApi> PersistenceAdapter<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn create_test(&self, meta: &TestMeta) -> Result<i64, AppError> {
        let created = self.api.create_test(meta).await?;
        info!("Created test {} ('{}')", created.id, meta.title);
        Ok(created.id)
    }

    pub async fn create_dsa_question(
        &self,
        test_id: i64,
        draft: &DsaQuestionDraft,
    ) -> Result<i64, AppError> {
        let req = draft.to_request(test_id)?;
        let created = self.api.create_dsa_question(&req).await?;
        info!(
            "Created {} DSA question {} for test {}",
            req.difficulty, created.id, test_id
        );
        Ok(created.id)
    }

    /// Creates the question, then its options one by one.
    ///
    /// If an option fails the question stays on the server with the options
    /// stored so far.
    pub async fn create_quiz_question(
        &self,
        test_id: i64,
        draft: &QuizQuestionDraft,
    ) -> Result<i64, AppError> {
        let req = draft.to_request(test_id)?;
        let question_id = self.api.create_quiz_question(&req).await?.id;

        let options = draft.choices.options();
        let total = options.len();
        for (stored, option) in options.into_iter().enumerate() {
            let option_req = CreateQuizOptionRequest {
                label: option.label,
                correct: option.correct,
                question_id,
            };
            if let Err(e) = self.api.create_quiz_option(&option_req).await {
                warn!(
                    "Quiz question {} left with {} of {} options: {}",
                    question_id, stored, total, e
                );
                return Err(e);
            }
        }

        info!(
            "Created {} quiz question {} with {} options for test {}",
            req.question_type, question_id, total, test_id
        );
        Ok(question_id)
    }

    pub async fn create_interview_question(
        &self,
        test_id: i64,
        draft: &InterviewQuestionDraft,
    ) -> Result<i64, AppError> {
        let req = draft.to_request(test_id)?;
        let created = self.api.create_interview_question(&req).await?;
        info!("Created interview question {} for test {}", created.id, test_id);
        Ok(created.id)
    }

    pub async fn delete_test(&self, test_id: i64) -> Result<(), AppError> {
        self.api.delete_test(test_id).await?;
        info!("Deleted test {}", test_id);
        Ok(())
    }

    /// Sends the metadata together with every saved question.
    pub async fn submit_test(&self, store: &DraftStore) -> Result<i64, AppError> {
        let req = submission(store)?;
        let created = self.api.submit_test(&req).await?;
        info!(
            "Submitted test '{}' ({} DSA, {} quiz, {} interview questions)",
            req.meta.title,
            req.dsa_questions.len(),
            req.quiz_questions.len(),
            req.ai_interview_questions.len()
        );
        Ok(created.id)
    }
}

/// Final submission body built from the saved items only.
pub fn submission(store: &DraftStore) -> Result<SubmitTestRequest, AppError> {
    let test_id = store.require_test_id()?;

    let dsa_questions = store
        .dsa
        .list_saved()
        .iter()
        .map(|saved| saved.item.to_request(test_id))
        .collect::<Result<Vec<_>, _>>()?;

    let quiz_questions = store
        .quiz
        .list_saved()
        .iter()
        .map(|saved| {
            Ok(QuizSubmission {
                question: saved.item.to_request(test_id)?,
                options: saved.item.choices.options(),
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let ai_interview_questions = store
        .interview
        .list_saved()
        .iter()
        .map(|saved| saved.item.to_request(test_id))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SubmitTestRequest {
        meta: store.meta().clone(),
        dsa_questions,
        quiz_questions,
        ai_interview_questions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::testing::RecordingApi,
        models::quiz::QuizType,
    };

    fn boolean_question() -> QuizQuestionDraft {
        let mut draft = QuizQuestionDraft {
            question: "Rust has a GC".to_string(),
            time_seconds: 20,
            ..Default::default()
        };
        draft.set_type(QuizType::Boolean);
        draft.choices.set_correct(1, true);
        draft
    }

    #[tokio::test]
    async fn quiz_question_then_each_option() {
        let api = RecordingApi::new();
        let adapter = PersistenceAdapter::new(api.clone());

        adapter.create_quiz_question(3, &boolean_question()).await.unwrap();

        assert_eq!(
            api.calls(),
            vec!["create_quiz_question", "create_quiz_option", "create_quiz_option"]
        );
    }

    #[tokio::test]
    async fn partial_option_failure_is_reported() {
        let api = RecordingApi::new();
        api.fail_on("create_quiz_option", 1);
        let adapter = PersistenceAdapter::new(api.clone());

        let err = adapter.create_quiz_question(3, &boolean_question()).await.unwrap_err();

        assert!(matches!(err, AppError::Api { status: 500, .. }));
        // The question and first option stay persisted.
        assert_eq!(api.calls(), vec!["create_quiz_question", "create_quiz_option"]);
    }

    #[tokio::test]
    async fn invalid_draft_issues_no_call() {
        let api = RecordingApi::new();
        let adapter = PersistenceAdapter::new(api.clone());

        let err = adapter
            .create_dsa_question(1, &DsaQuestionDraft::default())
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert!(api.calls().is_empty());
    }

    #[test]
    fn submission_requires_test_id() {
        assert!(submission(&DraftStore::new()).is_err());
    }
}
