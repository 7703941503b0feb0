//! Editor-driven pull request review documents
//!
//! This crate turns a pull request and its discussion into one reviewable
//! text document, and turns the user-edited document back into a structured
//! review draft:
//!
//! ```text
//! ┌──────────┐   render    ┌────────────┐   external    ┌────────────┐
//! │ PR meta  │────────────►│  document  │──────────────►│  document' │
//! │ + diff   │             │  (text)    │   editor      │  (edited)  │
//! └──────────┘             └────────────┘               └─────┬──────┘
//!                                                             │ parse
//!                                                             ▼
//!                                                      ┌─────────────┐
//!                                                      │ ReviewDraft │
//!                                                      └─────────────┘
//! ```
//!
//! The renderer delimits the top-level comment area with a marker pair and
//! the parser classifies every line of the edited document in one forward
//! pass. Both halves are pure: no network, no processes, plain strings in
//! and out, so the whole pipeline is testable in memory.

pub mod model;
pub mod render;
pub mod scanner;
pub mod wrap;

/// Opens the top-level comment region. Must survive the editing step
/// byte-for-byte or the region is not detected.
pub const TOP_LEVEL_START_MARKER: &str = "# ------ BEGIN  TOP-LEVEL REVIEW COMMENTS ----- #";

/// Closes the top-level comment region.
pub const TOP_LEVEL_END_MARKER: &str = "# ------ END OF TOP-LEVEL REVIEW COMMENTS ----- #";

pub use model::{DiscussionComment, DraftComment, PullRequestInfo, ReviewDraft};
pub use render::render_prelude;
pub use scanner::parse_review;
pub use wrap::wrap;
