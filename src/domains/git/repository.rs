use anyhow::{anyhow, Result};
use git2::{ErrorCode, Repository};
use std::path::{Path, PathBuf};

/// Locate the repository containing `start` and return its working
/// directory. Bare repositories are rejected; there is no sensible open-tab
/// set to track for them.
pub fn discover_repository(start: &Path) -> Result<PathBuf> {
    let repo = Repository::discover(start)
        .map_err(|e| anyhow!("No git repository found from '{}': {e}", start.display()))?;
    repo.workdir()
        .map(|path| path.to_path_buf())
        .ok_or_else(|| anyhow!("Repository at '{}' is bare", start.display()))
}

/// Path of the `.git` directory for the repository at `repo_path`.
pub fn git_dir(repo_path: &Path) -> Result<PathBuf> {
    let repo = Repository::open(repo_path)?;
    Ok(repo.path().to_path_buf())
}

/// Current branch name, or `None` when HEAD is detached. An unborn HEAD
/// (fresh repository without commits) still resolves to the symbolic branch
/// name, matching what version-control integrations report.
pub fn get_current_branch(repo_path: &Path) -> Result<Option<String>> {
    let repo = Repository::open(repo_path)?;

    match repo.head() {
        Ok(head) => {
            if head.is_branch() {
                Ok(head.shorthand().map(|name| name.to_string()))
            } else {
                Ok(None)
            }
        }
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            get_unborn_head_branch(&repo)
        }
        Err(e) => Err(anyhow!("Failed to resolve HEAD: {e}")),
    }
}

fn get_unborn_head_branch(repo: &Repository) -> Result<Option<String>> {
    let head_ref = repo.find_reference("HEAD")?;
    Ok(head_ref
        .symbolic_target()
        .and_then(|target| target.strip_prefix("refs/heads/"))
        .map(|name| name.to_string()))
}
