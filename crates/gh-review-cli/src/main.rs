//! gh-review: review a GitHub pull request from your text editor.
//!
//! Pipeline: fetch the PR ref and metadata, render the discussion and diff
//! into one text document, hand it to `$VISUAL`/`$EDITOR`, parse the edited
//! result back into a review draft, and submit it as a single review.

use anyhow::{bail, Context, Result};
use clap::Parser;
use gh_review_client::octocrab::Octocrab;
use gh_review_client::{OctocrabClient, ReviewClient};
use gh_review_draft::{parse_review, render_prelude};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

mod auth;
mod editor;
mod git;

#[derive(Parser, Debug)]
#[command(
    name = "gh-review",
    version,
    about = "Review a GitHub pull request from your text editor"
)]
struct Args {
    /// GitHub owner/repo name
    #[arg(
        short = 'p',
        long = "project",
        env = "GH_REVIEW_PROJECT",
        default_value = "cockroachdb/cockroach"
    )]
    project: String,

    /// Read the GitHub personal access token from this file
    /// (default: $HOME/.github-issue-token)
    #[arg(long = "token-file", env = "GH_REVIEW_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Pull request number
    pr: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (owner, repo) = split_project(&args.project)?;
    let token = auth::resolve_token(args.token_file.as_deref())?;
    let octocrab = Octocrab::builder()
        .personal_token(token)
        .build()
        .context("building GitHub client")?;
    let client = OctocrabClient::new(Arc::new(octocrab));

    run(&client, owner, repo, args.pr).await
}

async fn run(client: &dyn ReviewClient, owner: &str, repo: &str, number: u64) -> Result<()> {
    info!("Fetching refs for PR #{number}");
    git::fetch_pull_ref(owner, repo, number)
        .with_context(|| format!("fetching refs for {owner}/{repo}#{number}"))?;

    info!("Fetching details for PR #{number}");
    let pr = client
        .fetch_pull_request(owner, repo, number)
        .await
        .with_context(|| format!("fetching {owner}/{repo}#{number}"))?;
    let discussion = client
        .fetch_discussion(owner, repo, number)
        .await
        .with_context(|| format!("fetching discussion for {owner}/{repo}#{number}"))?;

    let mut prelude = Vec::new();
    render_prelude(&mut prelude, &pr, &discussion).context("rendering review document")?;
    let mut document = String::from_utf8(prelude).context("rendered document is not UTF-8")?;
    document.push_str(
        &git::commit_log_with_diff(&pr.base_sha, &pr.head_sha)
            .with_context(|| format!("generating diff for {owner}/{repo}#{number}"))?,
    );

    let edited = editor::edit_text(&document)?;
    let draft = parse_review(&edited);

    client
        .submit_review(owner, repo, number, &draft)
        .await
        .with_context(|| format!("submitting review for {owner}/{repo}#{number}"))
}

fn split_project(project: &str) -> Result<(&str, &str)> {
    match project.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner, repo))
        }
        _ => bail!(
            "invalid -p argument {project:?}: must be owner/repo, like rust-lang/rust"
        ),
    }
}
