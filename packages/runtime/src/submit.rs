//! Submission flow: the one runtime path that crosses every boundary.
//!
//! Order of operations: resolve conditionals, validate what is visible,
//! strip hidden values, hand the payload to the sink, then fire analytics.
//! Validation failures are recoverable and per-field; sink failures abort;
//! event-sink failures are logged and swallowed.

use crate::auth::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use formcraft_editor::CollaborationUpdate;
use formcraft_evaluator::{submission_values, validate_visible, FieldError, ValueMap};
use formcraft_model::Project;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use tracing::{info, warn};

/// A collaborator call failed. Carried by [`SubmitError::Sink`] or logged
/// for fire-and-forget sinks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SinkError(pub String);

#[derive(Error, Debug)]
pub enum SubmitError {
    /// At least one visible field failed validation. Recoverable; the
    /// errors map back to fields.
    #[error("{} field(s) failed validation", .0.len())]
    ValidationFailed(Vec<FieldError>),

    #[error("submission rejected: {0}")]
    Sink(#[from] SinkError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionMetadata {
    pub submitted_at: DateTime<Utc>,
    pub user: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl SubmissionMetadata {
    pub fn now(user: Option<UserId>) -> Self {
        Self {
            submitted_at: Utc::now(),
            user,
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub name: String,
    pub form_id: String,
    pub timestamp: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(name: impl Into<String>, form_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            form_id: form_id.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Submission collaborator: receives the final values and returns a
/// submission id.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(
        &self,
        form_id: &str,
        values: HashMap<String, Value>,
        metadata: &SubmissionMetadata,
    ) -> Result<String, SinkError>;
}

/// Fire-and-forget fan-out for collaboration updates and analytics.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn publish(&self, update: &CollaborationUpdate) -> Result<(), SinkError>;
    async fn track(&self, event: &AnalyticsEvent) -> Result<(), SinkError>;
}

/// Broadcast queued session updates; failures are logged, never propagated.
pub async fn broadcast(events: &dyn EventSink, updates: &[CollaborationUpdate]) {
    for update in updates {
        if let Err(err) = events.publish(update).await {
            warn!(update = %update.id, error = %err, "collaboration publish failed");
        }
    }
}

/// Submit a filled form.
///
/// Hidden fields are exempt: a hidden-but-required field never blocks, and a
/// hidden field's stale value never reaches the sink.
pub async fn submit_form(
    project: &Project,
    values: &ValueMap,
    sink: &dyn SubmissionSink,
    events: &dyn EventSink,
    metadata: SubmissionMetadata,
) -> Result<String, SubmitError> {
    let errors = validate_visible(project, values);
    if !errors.is_empty() {
        return Err(SubmitError::ValidationFailed(errors));
    }

    let payload = submission_values(project, values);
    let submission_id = sink.submit(&project.id, payload, &metadata).await?;
    info!(form = %project.id, submission = %submission_id, "form submitted");

    if project.settings.enable_analytics {
        let event = AnalyticsEvent::new("form_submitted", &project.id);
        if let Err(err) = events.track(&event).await {
            warn!(form = %project.id, error = %err, "analytics track failed");
        }
    }

    Ok(submission_id)
}

/// Recording test double for both sink traits.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub submissions: Mutex<Vec<(String, HashMap<String, Value>)>>,
    pub published: Mutex<Vec<CollaborationUpdate>>,
    pub tracked: Mutex<Vec<AnalyticsEvent>>,
    pub fail_submit: bool,
    pub fail_events: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionSink for RecordingSink {
    async fn submit(
        &self,
        form_id: &str,
        values: HashMap<String, Value>,
        _metadata: &SubmissionMetadata,
    ) -> Result<String, SinkError> {
        if self.fail_submit {
            return Err(SinkError("sink offline".to_string()));
        }
        let mut submissions = self
            .submissions
            .lock()
            .map_err(|_| SinkError("sink poisoned".to_string()))?;
        submissions.push((form_id.to_string(), values));
        Ok(format!("submission-{}", submissions.len()))
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn publish(&self, update: &CollaborationUpdate) -> Result<(), SinkError> {
        if self.fail_events {
            return Err(SinkError("events offline".to_string()));
        }
        self.published
            .lock()
            .map_err(|_| SinkError("sink poisoned".to_string()))?
            .push(update.clone());
        Ok(())
    }

    async fn track(&self, event: &AnalyticsEvent) -> Result<(), SinkError> {
        if self.fail_events {
            return Err(SinkError("events offline".to_string()));
        }
        self.tracked
            .lock()
            .map_err(|_| SinkError("sink poisoned".to_string()))?
            .push(event.clone());
        Ok(())
    }
}
