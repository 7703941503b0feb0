//! Octocrab-based review client
//!
//! Direct implementation of the `ReviewClient` trait using the octocrab
//! library. Review submission goes through the raw reviews endpoint so the
//! commit id, body, and inline comments land in one atomic POST.

use crate::client::ReviewClient;
use async_trait::async_trait;
use gh_review_draft::{DiscussionComment, DraftComment, PullRequestInfo, ReviewDraft};
use log::{debug, info};
use octocrab::models::IssueState;
use octocrab::Octocrab;
use serde::Serialize;
use std::sync::Arc;

/// Direct GitHub API client using octocrab.
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }
}

#[async_trait]
impl ReviewClient for OctocrabClient {
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> anyhow::Result<PullRequestInfo> {
        debug!("Fetching PR {}/{}#{}", owner, repo, number);
        let pr = self.octocrab.pulls(owner, repo).get(number).await?;
        Ok(convert_pull_request(owner, repo, &pr))
    }

    async fn fetch_discussion(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> anyhow::Result<Vec<DiscussionComment>> {
        debug!("Fetching discussion for {}/{}#{}", owner, repo, number);

        let mut comments = Vec::new();
        let mut page_num = 1u32;
        const PER_PAGE: u8 = 100;

        loop {
            let page = self
                .octocrab
                .issues(owner, repo)
                .list_comments(number)
                .per_page(PER_PAGE)
                .page(page_num)
                .send()
                .await?;

            if page.items.is_empty() {
                break;
            }
            for comment in page.items {
                comments.push(DiscussionComment {
                    author: comment.user.login,
                    created_at: comment.created_at,
                    body: comment.body,
                });
            }
            page_num += 1;
        }

        debug!(
            "Fetched {} discussion comments for {}/{}#{}",
            comments.len(),
            owner,
            repo,
            number
        );
        Ok(comments)
    }

    async fn submit_review(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        draft: &ReviewDraft,
    ) -> anyhow::Result<()> {
        if !draft.has_content() {
            info!("Nothing to submit for {}/{}#{}", owner, repo, number);
            return Ok(());
        }

        info!(
            "Submitting review with {} inline comments for {}/{}#{}",
            draft.comments.len(),
            owner,
            repo,
            number
        );

        let request = ReviewRequest {
            commit_id: draft.commit_id.as_deref(),
            body: draft.body.as_deref(),
            comments: &draft.comments,
        };
        let route = format!("/repos/{}/{}/pulls/{}/reviews", owner, repo, number);
        let _: serde_json::Value = self.octocrab.post(route, Some(&request)).await?;
        Ok(())
    }
}

/// Request body for the create-review endpoint.
///
/// No `event` field is sent, so the review is created in the pending state
/// and the comments arrive as one batch.
#[derive(Debug, Serialize)]
struct ReviewRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    commit_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
    comments: &'a [DraftComment],
}

/// Convert an octocrab pull request to the renderer's input type.
fn convert_pull_request(
    owner: &str,
    repo: &str,
    pr: &octocrab::models::pulls::PullRequest,
) -> PullRequestInfo {
    PullRequestInfo {
        number: pr.number,
        author: pr
            .user
            .as_ref()
            .map(|u| u.login.clone())
            .unwrap_or_else(|| "unknown".to_string()),
        title: pr.title.clone().unwrap_or_default(),
        state: state_label(pr.state.as_ref()).to_string(),
        body: pr.body.clone(),
        created_at: pr.created_at.unwrap_or_else(chrono::Utc::now),
        merged_at: pr.merged_at,
        closed_at: pr.closed_at,
        html_url: pr
            .html_url
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_else(|| {
                format!("https://github.com/{}/{}/pull/{}", owner, repo, pr.number)
            }),
        base_sha: pr.base.sha.clone(),
        head_sha: pr.head.sha.clone(),
    }
}

/// Render an issue state as the lowercase label shown in the document header.
fn state_label(state: Option<&IssueState>) -> &'static str {
    match state {
        Some(IssueState::Open) => "open",
        Some(IssueState::Closed) => "closed",
        _ => "unknown",
    }
}
