//! # FormCraft Runtime
//!
//! The document core's external boundary: persistence, authentication,
//! submission, and event fan-out are collaborators behind traits, not
//! features of the core. This crate defines those contracts, the in-memory
//! test doubles, and the one flow that crosses the boundary: submitting a
//! filled form.
//!
//! The core never retries a collaborator call; retry policy belongs to the
//! embedding application.

mod auth;
mod store;
mod submit;

pub use auth::{AuthProvider, StaticAuth, UserId};
pub use store::{
    FormStore, ListFilter, MemoryStore, PageOf, Pagination, ProjectSummary, StoreError,
};
pub use submit::{
    broadcast, submit_form, AnalyticsEvent, EventSink, RecordingSink, SinkError,
    SubmissionMetadata, SubmissionSink, SubmitError,
};
