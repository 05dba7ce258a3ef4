//! External query tool invocation.
//!
//! This module defines a minimal trait for running commands through the
//! line-oriented `tql` client, allowing the rest of the crate (and tests)
//! to work independently of the real executable.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use crate::error::{TqlError, TqlResult};

/// A type that can run commands through the external query tool.
///
/// Implemented by [`ShellTqlClient`]; tests substitute fakes that return
/// canned output.
pub trait TqlClient {
    /// Run a single command and return the tool's stdout.
    fn query(&self, command: &str) -> TqlResult<String>;

    /// Feed a script file to the tool on stdin in one invocation.
    fn run_script(&self, path: &Path) -> TqlResult<()>;
}

/// Runs commands by piping them into the `tql` executable.
#[derive(Debug, Clone)]
pub struct ShellTqlClient {
    program: PathBuf,
}

impl ShellTqlClient {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn spawn(&self, stdin: Stdio) -> TqlResult<Child> {
        Command::new(&self.program)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))
    }

    fn spawn_error(&self, source: std::io::Error) -> TqlError {
        TqlError::Spawn {
            program: self.program.display().to_string(),
            source,
        }
    }

    fn finish(&self, child: Child) -> TqlResult<String> {
        let output = child.wait_with_output().map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(TqlError::Tool {
                program: self.program.display().to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl TqlClient for ShellTqlClient {
    fn query(&self, command: &str) -> TqlResult<String> {
        tracing::debug!(command, "running tql command");

        let mut child = self.spawn(Stdio::piped())?;
        if let Some(mut pipe) = child.stdin.take() {
            pipe.write_all(command.as_bytes())
                .and_then(|()| pipe.write_all(b"\n"))
                .map_err(|e| self.spawn_error(e))?;
        }

        self.finish(child)
    }

    fn run_script(&self, path: &Path) -> TqlResult<()> {
        tracing::debug!(script = %path.display(), "running tql script");

        let script = std::fs::File::open(path).map_err(|e| TqlError::io(path, e))?;
        let child = self.spawn(Stdio::from(script))?;
        self.finish(child)?;
        Ok(())
    }
}
