//! GitHub API collaborator for editor-driven PR reviews
//!
//! Provides the [`ReviewClient`] trait — fetch a pull request, fetch its
//! discussion, submit a finished [`gh_review_draft::ReviewDraft`] — plus the
//! octocrab-backed implementation the CLI uses. The trait keeps the review
//! pipeline free of network dependencies in tests.

pub mod client;
pub mod octocrab_client;

pub use client::ReviewClient;
pub use octocrab_client::OctocrabClient;

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
