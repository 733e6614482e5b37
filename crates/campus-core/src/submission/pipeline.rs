use super::payload::MultipartPayload;
use crate::config::EmptyMediaPolicy;
use crate::error::Result;
use crate::form::FormModel;
use crate::notice::Notice;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The only status that counts as a successful create.
pub const HTTP_201_CREATED: u16 = 201;

/// Reason reported for every non-201 answer.
pub const GENERIC_REJECTION: &str = "The server declined to create the activity";

/// Read-only access to the session's bearer credential.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get_token(&self) -> Option<String>;
}

/// Performs the authenticated multipart create call.
#[async_trait]
pub trait ActivityEndpoint: Send + Sync {
    /// Sends `payload`, with `Authorization: Bearer <token>` when a token is
    /// given, and returns the HTTP status. `Err` means no HTTP answer was
    /// obtained.
    async fn create(&self, token: Option<&str>, payload: MultipartPayload) -> Result<u16>;
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionOutcome {
    Created,
    Rejected { status: u16, reason: String },
    TransportFailure(String),
}

impl SubmissionOutcome {
    /// Maps an HTTP status: 201 is `Created`, anything else `Rejected`.
    pub fn from_status(status: u16) -> Self {
        if status == HTTP_201_CREATED {
            Self::Created
        } else {
            Self::Rejected {
                status,
                reason: GENERIC_REJECTION.to_string(),
            }
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created)
    }

    /// The notice the user should see for this outcome.
    pub fn notice(&self) -> Notice {
        match self {
            Self::Created => Notice::Created,
            Self::Rejected { .. } => Notice::Rejected,
            Self::TransportFailure(_) => Notice::Failed,
        }
    }
}

/// Serializes a form, authenticates, and posts it exactly once.
///
/// No retries and no double-submit protection; callers decide both.
pub struct SubmissionPipeline {
    credentials: Arc<dyn CredentialStore>,
    endpoint: Arc<dyn ActivityEndpoint>,
    empty_media: EmptyMediaPolicy,
}

impl SubmissionPipeline {
    pub fn new(credentials: Arc<dyn CredentialStore>, endpoint: Arc<dyn ActivityEndpoint>) -> Self {
        Self {
            credentials,
            endpoint,
            empty_media: EmptyMediaPolicy::default(),
        }
    }

    pub fn with_empty_media(mut self, empty_media: EmptyMediaPolicy) -> Self {
        self.empty_media = empty_media;
        self
    }

    pub async fn submit(&self, form: &FormModel) -> SubmissionOutcome {
        let payload = MultipartPayload::from_form(form, self.empty_media);
        let token = self.credentials.get_token().await;
        if token.is_none() {
            tracing::debug!("[Submission] No access token in session store, sending anonymously");
        }

        match self.endpoint.create(token.as_deref(), payload).await {
            Ok(status) => {
                let outcome = SubmissionOutcome::from_status(status);
                if outcome.is_created() {
                    tracing::info!("[Submission] Activity created");
                } else {
                    tracing::warn!("[Submission] Create rejected with status {}", status);
                }
                outcome
            }
            Err(e) => {
                tracing::error!("[Submission] Create request failed: {}", e);
                SubmissionOutcome::TransportFailure(e.to_string())
            }
        }
    }
}
