//! External editor round-trip through a temp file.

use anyhow::{bail, Context, Result};
use std::env;
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// Characters that force running the editor through `sh -c`, so settings
/// like `EDITOR="emacs -nw"` work. The list follows git's run-command
/// handling of the editor variable.
const SHELL_MAGIC: &str = "|&;<>()$`\\\"' \t\n*?[#~=%";

/// Write `original` to a temp file, run the user's editor on it, and read
/// the (possibly modified) contents back.
pub fn edit_text(original: &str) -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("gh-review-")
        .tempfile()
        .context("creating temp file for editor")?;
    file.write_all(original.as_bytes())
        .context("writing review document")?;
    file.flush().context("writing review document")?;

    run_editor(file.path())?;

    std::fs::read_to_string(file.path()).context("reading edited review document")
}

fn run_editor(path: &Path) -> Result<()> {
    let ed = env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .unwrap_or_else(|_| "ed".to_string());
    log::debug!("Launching editor {ed:?}");

    let mut cmd = if needs_shell(&ed) {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(format!("{ed} \"$@\"")).arg(&ed).arg(path);
        cmd
    } else {
        let mut cmd = Command::new(&ed);
        cmd.arg(path);
        cmd
    };

    // Stdin/out/err stay inherited: the editor owns the terminal.
    let status = cmd
        .status()
        .with_context(|| format!("invoking editor {ed:?}"))?;
    if !status.success() {
        bail!("editor {ed:?} exited with {status}");
    }
    Ok(())
}

fn needs_shell(editor: &str) -> bool {
    editor.chars().any(|c| SHELL_MAGIC.contains(c))
}
