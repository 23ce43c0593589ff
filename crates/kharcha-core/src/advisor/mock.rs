//! Mock advisor backend for testing

use async_trait::async_trait;

use super::AdvisorBackend;
use crate::error::{Error, Result};

/// Canned backend: returns a fixed answer, or fails on demand so tests can
/// exercise the local fallback path
#[derive(Clone, Default)]
pub struct MockBackend {
    fail: bool,
}

impl MockBackend {
    pub fn new() -> Self {
        Self { fail: false }
    }

    /// A backend whose every call fails
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl AdvisorBackend for MockBackend {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        if self.fail {
            return Err(Error::Advisor("mock failure".to_string()));
        }
        Ok("Direct Answer:\nMock analysis of your spending.\n\n\
            Supporting Details:\n• Mock detail\n\n\
            Actionable Recommendations:\n• Mock recommendation"
            .to_string())
    }

    async fn health_check(&self) -> bool {
        !self.fail
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
