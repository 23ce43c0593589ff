//! AI advisor
//!
//! Answers questions about a user's spending. When a hosted model backend is
//! configured the question and an expense context block are sent as a single
//! prompt; on any failure (or with no backend at all) the answer comes from
//! the templated local analysis instead. Either way the caller gets an
//! answer - advisor failures are never surfaced as errors.
//!
//! # Architecture
//!
//! - `AdvisorBackend` trait: the generation interface
//! - `AdvisorClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `HostedBackend`, `MockBackend`
//! - `Advisor`: orchestration (validation, prompt assembly, fallback)

mod config;
mod fallback;
mod hosted;
mod mock;
mod prompt;

pub use config::AdvisorConfig;
pub use fallback::local_analysis;
pub use hosted::HostedBackend;
pub use mock::MockBackend;
pub use prompt::{build_prompt, format_context};

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::Expense;

/// Trait defining the interface for advisor generation backends
#[async_trait]
pub trait AdvisorBackend: Send + Sync {
    /// Generate an answer for a fully rendered prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Model name (for answer metadata and logging)
    fn model(&self) -> &str;

    /// Host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete advisor client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AdvisorClient {
    /// Hosted text-generation API
    Hosted(HostedBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AdvisorClient {
    /// Create a client from config file + environment
    ///
    /// Returns None when no hosted endpoint is configured; the advisor then
    /// answers from local analysis only.
    pub fn from_config(config: &AdvisorConfig) -> Option<Self> {
        match HostedBackend::from_config(config) {
            Ok(backend) => backend.map(AdvisorClient::Hosted),
            Err(e) => {
                warn!("Failed to build hosted advisor backend: {}", e);
                None
            }
        }
    }

    /// Create a client from environment variables
    pub fn from_env() -> Option<Self> {
        Self::from_config(&AdvisorConfig::load())
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AdvisorClient::Mock(MockBackend::new())
    }
}

#[async_trait]
impl AdvisorBackend for AdvisorClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        match self {
            AdvisorClient::Hosted(b) => b.generate(prompt).await,
            AdvisorClient::Mock(b) => b.generate(prompt).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AdvisorClient::Hosted(b) => b.health_check().await,
            AdvisorClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AdvisorClient::Hosted(b) => b.model(),
            AdvisorClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AdvisorClient::Hosted(b) => b.host(),
            AdvisorClient::Mock(b) => b.host(),
        }
    }
}

/// Where an answer came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    /// Hosted model generated the answer
    Remote,
    /// Templated local analysis
    Local,
}

/// An advisor answer with its provenance
#[derive(Debug, Clone, Serialize)]
pub struct AdvisorAnswer {
    pub answer: String,
    /// The expense context block the answer was based on
    pub context_used: String,
    pub source: AnswerSource,
    /// Model name when the answer came from the hosted backend
    pub model: Option<String>,
}

/// Advisor orchestration: validation, prompt assembly, remote call, fallback
pub struct Advisor {
    client: Option<AdvisorClient>,
}

impl Advisor {
    pub fn new(client: Option<AdvisorClient>) -> Self {
        Self { client }
    }

    /// Build from config file + environment
    pub fn from_env() -> Self {
        Self::new(AdvisorClient::from_env())
    }

    /// Whether a hosted backend is configured
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Answer a question over the user's expenses
    ///
    /// Validation failures (empty question, no expenses) are the only error
    /// paths; a failing hosted backend degrades to the local analysis.
    pub async fn answer(&self, question: &str, expenses: &[Expense]) -> Result<AdvisorAnswer> {
        if question.trim().is_empty() {
            return Err(Error::Validation("Question cannot be empty".to_string()));
        }
        if expenses.is_empty() {
            return Err(Error::Validation(
                "No expenses provided to analyze".to_string(),
            ));
        }

        let context = format_context(expenses);

        if let Some(client) = &self.client {
            let prompt = build_prompt(question, &context);
            match client.generate(&prompt).await {
                Ok(answer) => {
                    info!(model = client.model(), "Advisor answered remotely");
                    return Ok(AdvisorAnswer {
                        answer,
                        context_used: context,
                        source: AnswerSource::Remote,
                        model: Some(client.model().to_string()),
                    });
                }
                Err(e) => {
                    warn!("Advisor model failed, using local analysis: {}", e);
                }
            }
        }

        Ok(AdvisorAnswer {
            answer: local_analysis(question, expenses),
            context_used: context,
            source: AnswerSource::Local,
            model: None,
        })
    }
}
