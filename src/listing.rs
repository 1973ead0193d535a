// src/listing.rs

use tracing::{error, info};

use crate::{
    api::RecruitingApi, error::AppError, models::test::TestSummary,
    wizard::PersistenceAdapter,
};

/// Rows per page. Fixed.
pub const PAGE_SIZE: usize = 10;

pub const MSG_TEST_DELETED: &str = "Test deleted successfully!";
pub const MSG_DELETE_FAILED: &str = "Failed to delete test.";

/// Read path over all created tests, paginated client-side.
///
/// `load` pulls the full list once; pages are slices of that cache.
pub struct TestListing<A> {
    persistence: PersistenceAdapter<A>,
    tests: Vec<TestSummary>,
    message: Option<String>,
}

impl<A: RecruitingApi> TestListing<A> {
    pub fn new(api: A) -> Self {
        Self {
            persistence: PersistenceAdapter::new(api),
            tests: Vec::new(),
            message: None,
        }
    }

    /// Fetches every test. On failure the cache is emptied.
    pub async fn load(&mut self) -> Result<&[TestSummary], AppError> {
        let result = self.persistence.api().list_tests().await;
        match result {
            Ok(tests) => {
                info!("Loaded {} tests", tests.len());
                self.tests = tests;
                Ok(&self.tests)
            }
            Err(e) => {
                error!("Failed to load tests: {}", e);
                self.tests.clear();
                Err(e)
            }
        }
    }

    /// 1-based page of the cached list; empty when out of range.
    pub fn page(&self, n: usize) -> &[TestSummary] {
        if n == 0 {
            return &[];
        }
        let start = (n - 1).saturating_mul(PAGE_SIZE);
        if start >= self.tests.len() {
            return &[];
        }
        let end = (start + PAGE_SIZE).min(self.tests.len());
        &self.tests[start..end]
    }

    pub fn total(&self) -> usize {
        self.tests.len()
    }

    pub fn total_pages(&self) -> usize {
        self.tests.len().div_ceil(PAGE_SIZE)
    }

    pub fn has_previous(&self, n: usize) -> bool {
        n > 1
    }

    pub fn has_next(&self, n: usize) -> bool {
        n.saturating_mul(PAGE_SIZE) < self.tests.len()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Deletes on the backend first; the cache only drops the row on success.
    pub async fn delete(&mut self, id: i64) -> Result<(), AppError> {
        let result = self.persistence.delete_test(id).await;
        match result {
            Ok(()) => {
                self.tests.retain(|t| t.id != id);
                self.message = Some(MSG_TEST_DELETED.to_string());
                Ok(())
            }
            Err(e) => {
                error!("Failed to delete test {}: {}", id, e);
                self.message = Some(MSG_DELETE_FAILED.to_string());
                Err(e)
            }
        }
    }
}
