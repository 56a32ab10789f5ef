//! Version-control write-back: commit the updated instruction file and push it.

use crate::domain::constants::{BOT_EMAIL, BOT_NAME, PUSH_REMOTE};
use crate::domain::errors::PublishError;
use crate::domain::models::PublishOutcome;
use std::path::Path;

pub trait Publisher {
    fn publish(
        &self,
        file: &Path,
        commit_message: &str,
        branch_hint: Option<&str>,
    ) -> Result<PublishOutcome, PublishError>;
}

#[derive(Debug, Clone, Default)]
pub struct GitOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Seam over the `git` executable.
pub trait GitRunner {
    fn git(&self, args: &[&str]) -> Result<GitOutput, PublishError>;
}

/// Runs `git` in the process working directory, the same directory the
/// instruction path is resolved against.
pub struct SystemGit;

impl GitRunner for SystemGit {
    fn git(&self, args: &[&str]) -> Result<GitOutput, PublishError> {
        tracing::debug!("git {}", args.join(" "));
        let out = std::process::Command::new("git")
            .args(args)
            .output()
            .map_err(|source| PublishError::Spawn {
                step: step_name(args),
                source,
            })?;
        Ok(GitOutput {
            code: out.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&out.stdout).to_string(),
            stderr: String::from_utf8_lossy(&out.stderr).to_string(),
        })
    }
}

fn step_name(args: &[&str]) -> String {
    args.first().copied().unwrap_or("git").to_string()
}

pub struct GitPublisher<R: GitRunner> {
    runner: R,
}

impl<R: GitRunner> GitPublisher<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    #[cfg(test)]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs one git step and fails on any non-zero exit.
    fn run(&self, args: &[&str]) -> Result<GitOutput, PublishError> {
        let out = self.runner.git(args)?;
        if out.code != 0 {
            return Err(PublishError::Command {
                step: step_name(args),
                code: out.code,
                stderr: out.stderr.trim().to_string(),
            });
        }
        Ok(out)
    }

    fn has_staged_changes(&self) -> Result<bool, PublishError> {
        let args = ["diff", "--staged", "--quiet"];
        let out = self.runner.git(&args)?;
        match out.code {
            0 => Ok(false),
            1 => Ok(true),
            code => Err(PublishError::Command {
                step: step_name(&args),
                code,
                stderr: out.stderr.trim().to_string(),
            }),
        }
    }

    fn current_branch(&self) -> Result<String, PublishError> {
        let out = self.run(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        let branch = out.stdout.trim().to_string();
        if branch.is_empty() {
            return Err(PublishError::UnknownBranch);
        }
        Ok(branch)
    }
}

impl<R: GitRunner> Publisher for GitPublisher<R> {
    fn publish(
        &self,
        file: &Path,
        commit_message: &str,
        branch_hint: Option<&str>,
    ) -> Result<PublishOutcome, PublishError> {
        let file = file.to_string_lossy().to_string();
        self.run(&["config", "--local", "user.email", BOT_EMAIL])?;
        self.run(&["config", "--local", "user.name", BOT_NAME])?;
        self.run(&["add", file.as_str()])?;

        if !self.has_staged_changes()? {
            return Ok(PublishOutcome::NoChange);
        }

        self.run(&["commit", "-m", commit_message])?;

        let branch = match branch_hint.filter(|b| !b.is_empty()) {
            Some(b) => b.to_string(),
            None => self.current_branch()?,
        };
        let refspec = format!("HEAD:{}", branch);
        self.run(&["push", PUSH_REMOTE, refspec.as_str()])?;

        Ok(PublishOutcome::Published { branch })
    }
}
