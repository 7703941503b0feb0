//! GitHub token resolution
//!
//! Resolution order:
//! 1. Explicit `--token-file` flag
//! 2. `GITHUB_TOKEN` / `GH_TOKEN` environment variables
//! 3. `$HOME/.github-issue-token`

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_TOKEN_FILE: &str = ".github-issue-token";

/// Resolve a GitHub personal access token.
pub fn resolve_token(token_file: Option<&Path>) -> Result<String> {
    resolve_token_with(token_file, |key| env::var(key).ok())
}

/// Resolution logic with an injectable environment reader, so the
/// precedence order is testable without mutating process state.
fn resolve_token_with(
    token_file: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<String> {
    if let Some(path) = token_file {
        return read_token_file(path);
    }

    for key in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Some(token) = env(key) {
            let token = token.trim().to_string();
            if !token.is_empty() {
                log::debug!("Using token from env var {key}");
                return Ok(token);
            }
        }
    }

    let path = default_token_file(&env)?;
    read_token_file(&path).with_context(|| {
        format!(
            "no GitHub token found\n\
             Please create a personal access token at \
             https://github.com/settings/tokens/new\n\
             and write it to {} to use this program.\n\
             The token only needs the repo scope, or private_repo if you \
             want to review private repositories.\n\
             Alternatively, export it as GITHUB_TOKEN.",
            path.display()
        )
    })
}

fn default_token_file(env: &impl Fn(&str) -> Option<String>) -> Result<PathBuf> {
    let home = env("HOME").context("HOME is not set")?;
    Ok(Path::new(&home).join(DEFAULT_TOKEN_FILE))
}

fn read_token_file(path: &Path) -> Result<String> {
    check_permissions(path)?;
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading token from {}", path.display()))?;
    let token = data.trim().to_string();
    if token.is_empty() {
        bail!("token file {} is empty", path.display());
    }
    Ok(token)
}

/// Refuse token files readable by group or other.
#[cfg(unix)]
fn check_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path)
        .with_context(|| format!("reading token from {}", path.display()))?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        bail!(
            "token file {} mode is {:#o}, want {:#o}",
            path.display(),
            mode & 0o777,
            mode & 0o700
        );
    }
    Ok(())
}

#[cfg(not(unix))]
fn check_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
