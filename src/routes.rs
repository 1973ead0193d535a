// src/routes.rs

use url::Url;

use crate::error::AppError;

/// Route table of the Recruiting API endpoints this crate consumes.
///
/// * Admin auth: `/admin/login`.
/// * Tests: `/admin/tests`, `/admin/tests/{id}`.
/// * Question content: DSA, quiz (questions + options), interview.
#[derive(Debug, Clone)]
pub struct Routes {
    base: Url,
}

impl Routes {
    /// Normalizes `base` so relative joins keep any path prefix
    /// (`http://host/api` resolves `admin/tests` to `http://host/api/admin/tests`).
    pub fn new(mut base: Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self { base }
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        Ok(self.base.join(path)?)
    }

    pub fn admin_login(&self) -> Result<Url, AppError> {
        self.endpoint("admin/login")
    }

    pub fn tests(&self) -> Result<Url, AppError> {
        self.endpoint("admin/tests")
    }

    pub fn test(&self, id: i64) -> Result<Url, AppError> {
        self.endpoint(&format!("admin/tests/{}", id))
    }

    pub fn dsa_questions(&self) -> Result<Url, AppError> {
        self.endpoint("admin/dsa-questions")
    }

    pub fn quiz_questions(&self) -> Result<Url, AppError> {
        self.endpoint("admin/quiz-questions")
    }

    pub fn quiz_options(&self) -> Result<Url, AppError> {
        self.endpoint("admin/quiz-options")
    }

    pub fn interview_questions(&self) -> Result<Url, AppError> {
        self.endpoint("admin/interview-questions")
    }
}
