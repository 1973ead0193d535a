// src/api/http.rs

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::{
    api::RecruitingApi,
    config::Config,
    error::AppError,
    models::{
        dsa::CreateDsaQuestionRequest,
        interview::CreateInterviewQuestionRequest,
        quiz::{CreateQuizOptionRequest, CreateQuizQuestionRequest},
        test::{AdminLoginRequest, AdminLoginResponse, CreatedResource, SubmitTestRequest, TestMeta, TestSummary},
    },
    routes::Routes,
    session::{Session, UserClass},
};

/// `RecruitingApi` over HTTP, authenticated with the bearer token of `session`.
#[derive(Debug, Clone)]
pub struct HttpRecruitingApi {
    http: Client,
    routes: Routes,
    session: Option<Session>,
}

impl HttpRecruitingApi {
    pub fn new(config: &Config, session: Session) -> Result<Self, AppError> {
        Self::build(config, Some(session))
    }

    /// Client without credentials; only `admin_login` succeeds with it.
    pub fn anonymous(config: &Config) -> Result<Self, AppError> {
        Self::build(config, None)
    }

    fn build(config: &Config, session: Option<Session>) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            routes: Routes::new(config.api_base_url.clone()),
            session,
        })
    }

    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, AppError> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| AppError::AuthError("No session for this client".to_string()))?;
        // Every endpoint behind this client lives under /admin.
        if session.class() != UserClass::Admin {
            return Err(AppError::AuthError(format!(
                "Admin endpoints need '{}', not '{}'",
                UserClass::Admin.storage_key(),
                session.class().storage_key()
            )));
        }
        Ok(builder.bearer_auth(session.token()))
    }

    async fn post<B, T>(&self, url: Url, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!("POST {}", url);
        let request = self.authorized(self.http.post(url.clone()).json(body))?;
        let response = request.send().await?;
        decode(url, response).await
    }
}

/// Maps a response onto `T` or onto the matching `AppError` variant.
async fn decode<T: DeserializeOwned>(url: Url, response: Response) -> Result<T, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body);
    error!("{} answered {}: {}", url, status, message);

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::AuthError(message),
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        _ => AppError::Api {
            status: status.as_u16(),
            message,
        },
    })
}

/// Pulls `detail` (FastAPI) or `error` out of a JSON error body.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "error"] {
            match value.get(key) {
                Some(Value::String(msg)) => return msg.clone(),
                Some(other) if !other.is_null() => return other.to_string(),
                _ => {}
            }
        }
    }
    body.to_string()
}

#[async_trait]
impl RecruitingApi for HttpRecruitingApi {
    async fn admin_login(&self, req: &AdminLoginRequest) -> Result<AdminLoginResponse, AppError> {
        let url = self.routes.admin_login()?;
        debug!("POST {}", url);
        let response = self.http.post(url.clone()).json(req).send().await?;
        decode(url, response).await
    }

    async fn create_test(&self, req: &TestMeta) -> Result<CreatedResource, AppError> {
        self.post(self.routes.tests()?, req).await
    }

    async fn submit_test(&self, req: &SubmitTestRequest) -> Result<CreatedResource, AppError> {
        self.post(self.routes.tests()?, req).await
    }

    async fn create_dsa_question(
        &self,
        req: &CreateDsaQuestionRequest,
    ) -> Result<CreatedResource, AppError> {
        self.post(self.routes.dsa_questions()?, req).await
    }

    async fn create_quiz_question(
        &self,
        req: &CreateQuizQuestionRequest,
    ) -> Result<CreatedResource, AppError> {
        self.post(self.routes.quiz_questions()?, req).await
    }

    async fn create_quiz_option(
        &self,
        req: &CreateQuizOptionRequest,
    ) -> Result<CreatedResource, AppError> {
        self.post(self.routes.quiz_options()?, req).await
    }

    async fn create_interview_question(
        &self,
        req: &CreateInterviewQuestionRequest,
    ) -> Result<CreatedResource, AppError> {
        self.post(self.routes.interview_questions()?, req).await
    }

    async fn list_tests(&self) -> Result<Vec<TestSummary>, AppError> {
        let url = self.routes.tests()?;
        debug!("GET {}", url);
        let response = self.authorized(self.http.get(url.clone()))?.send().await?;
        decode(url, response).await
    }

    /// The backend answers a missing id with 2xx and `{"error": ...}`.
    async fn delete_test(&self, id: i64) -> Result<(), AppError> {
        let url = self.routes.test(id)?;
        debug!("DELETE {}", url);
        let response = self.authorized(self.http.delete(url.clone()))?.send().await?;
        if !response.status().is_success() {
            return decode::<Value>(url, response).await.map(|_| ());
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(());
        }
        let body: Value = serde_json::from_str(&text)?;

        match body.get("error") {
            Some(Value::String(msg)) => Err(AppError::NotFound(msg.clone())),
            _ => Ok(()),
        }
    }
}
