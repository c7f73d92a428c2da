//! External process execution
//!
//! Every child process the installer starts (the Maven build, the query
//! server control script) is described as an [`Invocation`] and handed to a
//! [`ProcessLauncher`]. Production code uses [`SystemLauncher`]; tests swap in
//! a recorder so nothing is really spawned and no privilege switch happens.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use tracing::debug;

use crate::error::{self, Result};

/// A fully described child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Working directory; inherited when `None`.
    pub cwd: Option<PathBuf>,
    /// Complete environment for the child; inherited when `None`.
    pub env: Option<Vec<(OsString, OsString)>>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: None,
        }
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    #[must_use]
    pub fn envs(mut self, env: Vec<(OsString, OsString)>) -> Self {
        self.env = Some(env);
        self
    }

    /// Space-joined command line, for logs and error messages.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Runs an [`Invocation`] to completion and reports its exit code.
///
/// Only a failure to start the process is an error; a non-zero exit code is
/// returned as data so each step can decide whether it matters.
pub trait ProcessLauncher {
    fn run(&self, invocation: &Invocation) -> Result<i32>;
}

/// Spawns real child processes, inheriting stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl ProcessLauncher for SystemLauncher {
    fn run(&self, invocation: &Invocation) -> Result<i32> {
        debug!("Spawning '{}'", invocation.command_line());

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(cwd) = &invocation.cwd {
            command.current_dir(cwd);
        }
        if let Some(env) = &invocation.env {
            command.env_clear().envs(env.iter().cloned());
        }

        let status = command
            .status()
            .map_err(|e| error::process::spawn_failed(invocation.command_line(), e.to_string()))?;
        Ok(exit_code(status))
    }
}

/// Exit code of a finished child; a signal-terminated child maps to `128 + signal`.
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
