//! Review client trait
//!
//! Defines the narrow interface the review pipeline needs from GitHub:
//! fetch PR metadata, fetch the discussion, submit the finished draft.
//! Keeping it a trait lets the pipeline run against an in-memory fake.

use async_trait::async_trait;
use gh_review_draft::{DiscussionComment, PullRequestInfo, ReviewDraft};

/// GitHub operations used by the review pipeline.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// async tasks.
#[async_trait]
pub trait ReviewClient: Send + Sync {
    /// Fetch the metadata of a single pull request.
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner (user or organization)
    /// * `repo` - Repository name
    /// * `number` - Pull request number
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> anyhow::Result<PullRequestInfo>;

    /// Fetch all discussion (issue) comments on a pull request.
    ///
    /// Pages through the comment list until exhausted; the returned
    /// vector preserves posting order.
    async fn fetch_discussion(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> anyhow::Result<Vec<DiscussionComment>>;

    /// Submit a parsed draft as a single atomic review.
    ///
    /// A draft with no inline comments and no non-empty body is skipped
    /// without touching the API; a body-only draft is still posted.
    async fn submit_review(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        draft: &ReviewDraft,
    ) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use gh_review_draft::{parse_review, render_prelude, DraftComment};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// In-memory stand-in for GitHub: serves canned metadata and records
    /// every submitted draft.
    #[derive(Default)]
    struct InMemoryClient {
        submitted: Mutex<Vec<ReviewDraft>>,
    }

    #[async_trait]
    impl ReviewClient for InMemoryClient {
        async fn fetch_pull_request(
            &self,
            _owner: &str,
            _repo: &str,
            number: u64,
        ) -> anyhow::Result<PullRequestInfo> {
            Ok(PullRequestInfo {
                number,
                author: "octocat".to_string(),
                title: "Add frobnicator".to_string(),
                state: "open".to_string(),
                body: Some("Adds the frobnicator.".to_string()),
                created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
                merged_at: None,
                closed_at: None,
                html_url: format!("https://github.com/acme/widgets/pull/{number}"),
                base_sha: "base000".to_string(),
                head_sha: "head000".to_string(),
            })
        }

        async fn fetch_discussion(
            &self,
            _owner: &str,
            _repo: &str,
            _number: u64,
        ) -> anyhow::Result<Vec<DiscussionComment>> {
            Ok(Vec::new())
        }

        async fn submit_review(
            &self,
            _owner: &str,
            _repo: &str,
            _number: u64,
            draft: &ReviewDraft,
        ) -> anyhow::Result<()> {
            self.submitted.lock().unwrap().push(draft.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_review_round_trip_against_fake() {
        let client = InMemoryClient::default();

        let pr = client.fetch_pull_request("acme", "widgets", 7).await.unwrap();
        let discussion = client.fetch_discussion("acme", "widgets", 7).await.unwrap();

        let mut prelude = Vec::new();
        render_prelude(&mut prelude, &pr, &discussion).unwrap();
        let mut document = String::from_utf8(prelude).unwrap();
        document.push_str(
            "commit abc123\n\
             diff --git a/src/lib.rs b/src/lib.rs\n\
             --- a/src/lib.rs\n\
             +++ b/src/lib.rs\n\
             @@ -1,2 +1,2 @@\n \
             context\n\
             +added\n",
        );
        // Stand-in for the editing step: annotate the added line.
        document.push_str("tighten this up\n");

        let draft = parse_review(&document);
        client
            .submit_review("acme", "widgets", 7, &draft)
            .await
            .unwrap();

        let submitted = client.submitted.lock().unwrap();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].commit_id.as_deref(), Some("abc123"));
        assert_eq!(
            submitted[0].comments,
            vec![DraftComment {
                path: "src/lib.rs".to_string(),
                position: 2,
                body: "tighten this up\n".to_string(),
            }]
        );
    }
}
