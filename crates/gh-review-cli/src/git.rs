//! Git subprocess helpers: materialize the PR head and produce the diff.

use anyhow::{bail, Context, Result};
use log::debug;
use std::process::{Command, Stdio};

/// Log format matching the rendered prelude: `commit <hash>` headers the
/// scanner keys on, author/date lines, then the commit message indented by
/// four spaces so it can never be mistaken for typed comment text.
const LOG_FORMAT: &str =
    "--pretty=tformat:commit %H%nAuthor: %an <%ae>%nDate:   %ad%n%n%w(0,4,4)%B";

/// Fetch the pull request head into a local `reviews/pr/<n>` ref so the
/// commits are available for diffing.
pub fn fetch_pull_ref(owner: &str, repo: &str, number: u64) -> Result<()> {
    let url = format!("https://github.com/{owner}/{repo}");
    let refspec = format!("refs/pull/{number}/head:reviews/pr/{number}");
    debug!("git fetch {url} {refspec}");

    let status = Command::new("git")
        .args(["fetch", &url, &refspec])
        .status()
        .context("invoking git fetch")?;
    if !status.success() {
        bail!("git fetch exited with {status}");
    }
    Ok(())
}

/// Produce the commit log plus unified diff for `base..head`, oldest commit
/// first, as the text appended after the rendered prelude.
pub fn commit_log_with_diff(base: &str, head: &str) -> Result<String> {
    let range = format!("{base}..{head}");
    debug!("git show --reverse {range}");

    let output = Command::new("git")
        .args(["show", "--reverse", LOG_FORMAT, &range])
        .stderr(Stdio::inherit())
        .output()
        .context("invoking git show")?;
    if !output.status.success() {
        bail!("git show exited with {}", output.status);
    }
    String::from_utf8(output.stdout).context("git show produced non-UTF-8 output")
}
