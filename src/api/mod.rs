// src/api/mod.rs

pub mod http;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        dsa::CreateDsaQuestionRequest,
        interview::CreateInterviewQuestionRequest,
        quiz::{CreateQuizOptionRequest, CreateQuizQuestionRequest},
        test::{AdminLoginRequest, AdminLoginResponse, CreatedResource, SubmitTestRequest, TestMeta, TestSummary},
    },
};

pub use http::HttpRecruitingApi;

/// The Recruiting API endpoints used by the authoring wizard and the test listing.
///
/// Every method is exactly one request/response round trip.
#[async_trait]
pub trait RecruitingApi: Send + Sync {
    async fn admin_login(&self, req: &AdminLoginRequest) -> Result<AdminLoginResponse, AppError>;

    async fn create_test(&self, req: &TestMeta) -> Result<CreatedResource, AppError>;

    /// Final submission of a finished wizard (same endpoint as `create_test`).
    async fn submit_test(&self, req: &SubmitTestRequest) -> Result<CreatedResource, AppError>;

    async fn create_dsa_question(
        &self,
        req: &CreateDsaQuestionRequest,
    ) -> Result<CreatedResource, AppError>;

    async fn create_quiz_question(
        &self,
        req: &CreateQuizQuestionRequest,
    ) -> Result<CreatedResource, AppError>;

    async fn create_quiz_option(
        &self,
        req: &CreateQuizOptionRequest,
    ) -> Result<CreatedResource, AppError>;

    async fn create_interview_question(
        &self,
        req: &CreateInterviewQuestionRequest,
    ) -> Result<CreatedResource, AppError>;

    async fn list_tests(&self) -> Result<Vec<TestSummary>, AppError>;

    async fn delete_test(&self, id: i64) -> Result<(), AppError>;
}
