//! Prompt-based validator
//!
//! Renders a fixed prompt around the document, hands it to a pluggable
//! [`CompletionBackend`] and reads a `{"isValid": bool, "errors": [..]}`
//! answer out of the reply. Models often wrap the JSON in prose, so the
//! slice from the first `{` to the last `}` is what gets parsed.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ServiceError;
use crate::types::{ServiceRequest, ValidationReport, ValidationService};

const DOCUMENT_SLOT: &str = "{{document}}";

/// Prompt sent to the completion backend; `{{document}}` is replaced
pub const PROMPT_TEMPLATE: &str = "\
You are an expert HPC configuration validator. You will be given a YAML configuration, \
and your job is to determine if the configuration is valid and follows HPC deployment standards.

If the configuration is invalid, return a list of errors in the errors field.
If the configuration is valid, return an empty list of errors.

Answer with a JSON object of the form {\"isValid\": boolean, \"errors\": [string]}.

YAML Configuration:
{{document}}";

/// Text completion backend
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Complete a prompt
    ///
    /// # Errors
    /// Backend-specific failure, usually `ServiceError::Backend`
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError>;
}

#[derive(Debug, Deserialize)]
struct Answer {
    #[serde(rename = "isValid")]
    is_valid: bool,
    #[serde(default)]
    errors: Vec<String>,
}

/// Render the prompt for one document
#[must_use]
pub fn render_prompt(document: &str) -> String {
    PROMPT_TEMPLATE.replace(DOCUMENT_SLOT, document)
}

/// Parse a completion into a report
///
/// # Errors
/// `ServiceError::Decode` if no JSON object is present or it has the wrong shape
pub fn parse_answer(completion: &str) -> Result<ValidationReport, ServiceError> {
    let start = completion.find('{');
    let end = completion.rfind('}');
    let json = match (start, end) {
        (Some(start), Some(end)) if start < end => &completion[start..=end],
        _ => return Err(ServiceError::Decode("no JSON object in completion".to_string())),
    };

    let answer: Answer =
        serde_json::from_str(json).map_err(|e| ServiceError::Decode(e.to_string()))?;
    Ok(ValidationReport {
        valid: answer.is_valid,
        errors: answer.errors,
    })
}

/// [`ValidationService`] backed by a completion model
///
/// Region and zone are not part of the prompt.
#[derive(Debug, Clone)]
pub struct LlmValidator<B> {
    backend: B,
}

impl<B: CompletionBackend> LlmValidator<B> {
    /// Wrap a backend
    #[inline]
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The wrapped backend
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[async_trait]
impl<B: CompletionBackend> ValidationService for LlmValidator<B> {
    async fn validate(&self, request: &ServiceRequest) -> Result<ValidationReport, ServiceError> {
        let prompt = render_prompt(&request.document);
        let completion = self.backend.complete(&prompt).await?;
        tracing::debug!(chars = completion.len(), "completion received");
        parse_answer(&completion)
    }
}
