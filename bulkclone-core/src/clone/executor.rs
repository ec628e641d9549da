//! Clone process launching

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::process::{Output, Stdio};

use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::repository::Repository;

/// Exit status and captured streams of a finished clone process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl From<Output> for JobOutput {
    fn from(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Completion of an already-launched clone process
pub type JobFuture = Pin<Box<dyn Future<Output = std::io::Result<JobOutput>> + Send + 'static>>;

/// Capability to start clone processes
///
/// `launch` starts the process before returning; the returned future only
/// waits for it. A launch error means no process exists.
pub trait CloneExecutor: Send + Sync {
    /// Start cloning `repo` into `workdir/<repo.name>`
    fn launch(&self, repo: &Repository, workdir: &Path) -> std::io::Result<JobFuture>;
}

/// External tool used to clone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloneTool {
    /// `gh repo clone <owner>/<name>`
    #[default]
    Gh,
    /// `git clone https://github.com/<owner>/<name>.git <name>`
    Git,
}

impl std::str::FromStr for CloneTool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gh" => Ok(Self::Gh),
            "git" => Ok(Self::Git),
            other => Err(format!("unknown clone tool '{}', expected gh or git", other)),
        }
    }
}

impl std::fmt::Display for CloneTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gh => f.write_str("gh"),
            Self::Git => f.write_str("git"),
        }
    }
}

/// Executor that runs the configured clone tool as a child process
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    tool: CloneTool,
    program: String,
}

impl ProcessExecutor {
    /// Executor for `tool`, found as `program` (a path or a name in PATH)
    pub fn new(tool: CloneTool, program: impl Into<String>) -> Self {
        Self {
            tool,
            program: program.into(),
        }
    }

    /// The tool this executor runs
    pub fn tool(&self) -> CloneTool {
        self.tool
    }

    fn command(&self, repo: &Repository, workdir: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        match self.tool {
            CloneTool::Gh => {
                cmd.arg("repo").arg("clone").arg(&repo.full_name);
            }
            CloneTool::Git => {
                cmd.arg("clone")
                    .arg(format!("https://github.com/{}.git", repo.full_name))
                    .arg(&repo.name);
            }
        }
        cmd.current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl CloneExecutor for ProcessExecutor {
    fn launch(&self, repo: &Repository, workdir: &Path) -> std::io::Result<JobFuture> {
        let child = self.command(repo, workdir).spawn()?;
        tracing::debug!(repo = %repo, pid = ?child.id(), "clone process started");

        // Both pipes are drained while waiting so a full pipe cannot stall the child.
        Ok(Box::pin(async move {
            child.wait_with_output().await.map(JobOutput::from)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cmd: &Command) -> Vec<String> {
        cmd.as_std()
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_gh_command_line() {
        let exec = ProcessExecutor::new(CloneTool::Gh, "gh");
        let cmd = exec.command(&Repository::new("octo", "hello"), Path::new("/tmp"));
        assert_eq!(cmd.as_std().get_program(), "gh");
        assert_eq!(args(&cmd), vec!["repo", "clone", "octo/hello"]);
        assert_eq!(cmd.as_std().get_current_dir(), Some(Path::new("/tmp")));
    }

    #[test]
    fn test_git_command_line() {
        let exec = ProcessExecutor::new(CloneTool::Git, "/usr/bin/git");
        let cmd = exec.command(&Repository::new("octo", "hello"), Path::new("/tmp"));
        assert_eq!(
            args(&cmd),
            vec!["clone", "https://github.com/octo/hello.git", "hello"]
        );
    }

    #[test]
    fn test_clone_tool_from_str() {
        assert_eq!("gh".parse::<CloneTool>().unwrap(), CloneTool::Gh);
        assert_eq!("GIT".parse::<CloneTool>().unwrap(), CloneTool::Git);
        assert!("svn".parse::<CloneTool>().is_err());
    }

    #[tokio::test]
    async fn test_launch_missing_program_fails() {
        let exec = ProcessExecutor::new(CloneTool::Gh, "/usr/bin/nonexistent-gh-binary");
        let result = exec.launch(&Repository::new("octo", "hello"), &std::env::temp_dir());
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_launch_captures_exit_code_and_stderr() {
        // `sh repo clone octo/hello` fails to find a script named "repo".
        let exec = ProcessExecutor::new(CloneTool::Gh, "sh");
        let job = exec
            .launch(&Repository::new("octo", "hello"), &std::env::temp_dir())
            .unwrap();
        let output = job.await.unwrap();
        assert_ne!(output.code, Some(0));
        assert!(!output.stderr.is_empty());
    }
}
