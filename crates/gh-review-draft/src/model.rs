//! Review draft data model
//!
//! These types are what the scanner produces and what the renderer consumes.
//! They are intentionally separate from any GitHub API types to keep this
//! crate pure and testable with in-memory strings.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A parsed review: one optional top-level body plus ordered inline comments.
///
/// Built incrementally by [`crate::parse_review`] and handed whole to the
/// submission collaborator. Not mutated after parsing completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    /// Top-level review comment. `Some` only if a marker-delimited region
    /// was found and closed; an absent or unterminated region leaves this
    /// `None`, never `Some("")`.
    pub body: Option<String>,

    /// Commit hash from the most recent `commit <sha>` header line.
    /// Last one wins when a document contains several commits.
    pub commit_id: Option<String>,

    /// Inline comments in order of first occurrence in the document.
    pub comments: Vec<DraftComment>,
}

impl ReviewDraft {
    /// Whether the draft carries anything worth submitting: at least one
    /// inline comment, or a top-level body with non-whitespace content.
    pub fn has_content(&self) -> bool {
        !self.comments.is_empty()
            || self
                .body
                .as_deref()
                .is_some_and(|body| !body.trim().is_empty())
    }
}

/// An inline comment anchored to a file and a diff position.
///
/// `position` counts diff lines (context, added, removed, and subsequent
/// hunk headers) from the start of the hunk run the comment sits in; the
/// review API uses it to anchor the comment to a specific diff line.
///
/// Serializes with the field names the review endpoint expects, so drafts
/// can be embedded directly in the submission request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftComment {
    /// File path relative to the repository root (from the `+++ b/` header).
    pub path: String,

    /// Count of diff lines seen since the active hunk run began.
    pub position: u32,

    /// Comment text, verbatim from the document, line endings included.
    pub body: String,
}

/// Pull request metadata consumed by the renderer.
#[derive(Debug, Clone)]
pub struct PullRequestInfo {
    /// PR number (e.g., 123)
    pub number: u64,

    /// Author's login
    pub author: String,

    /// PR title
    pub title: String,

    /// PR state (e.g., "open", "closed")
    pub state: String,

    /// PR body/description
    pub body: Option<String>,

    /// When the PR was created
    pub created_at: DateTime<Utc>,

    /// When the PR was merged, if it was
    pub merged_at: Option<DateTime<Utc>>,

    /// When the PR was closed, if it was
    pub closed_at: Option<DateTime<Utc>>,

    /// PR URL for reference in the rendered header
    pub html_url: String,

    /// Base commit SHA (used by the caller to generate the diff)
    pub base_sha: String,

    /// HEAD commit SHA (used by the caller to generate the diff)
    pub head_sha: String,
}

/// An existing discussion comment echoed into the rendered document.
#[derive(Debug, Clone)]
pub struct DiscussionComment {
    /// Commenter's login
    pub author: String,

    /// When the comment was posted
    pub created_at: DateTime<Utc>,

    /// Comment text
    pub body: Option<String>,
}
