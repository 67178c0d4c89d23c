// pocopack: POCO C++ Libraries package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and lifecycle management.
//!
//! ```text
//! run_with_cancellation(token)
//!              |
//!              v
//!     build_command()
//!     args, stdio
//!              |
//!              v
//!     spawn() --> run_child
//!              |
//!              v
//!    exit_code == 0
//!    (not checked when interrupted)
//!              |
//!              v
//!       ProcessOutput
//!    { exit_code, stderr, interrupted }
//! ```

use crate::error::{ProcessError, Result};
use std::fmt::Write as _;
use std::process::Stdio;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};

impl ProcessBuilder {
    /// Returns the display name for this process.
    fn display_name(&self) -> String {
        self.name_override().map_or_else(
            || {
                self.program().file_stem().map_or_else(
                    || "process".to_string(),
                    |s| s.to_string_lossy().into_owned(),
                )
            },
            String::from,
        )
    }

    /// Returns the full command line as a string (for logging).
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut cmd = format!("{}", self.program().display());
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns the process and waits for it to exit or for `token` to be
    /// cancelled.
    ///
    /// On cancellation the process is killed and the output is returned
    /// with `interrupted = true`; the exit code is not checked then.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Spawning the child process fails.
    /// - The process exits with a non-zero code.
    /// - Waiting for the child fails.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use tokio_util::sync::CancellationToken;
    /// use pocopack::core::process::builder::ProcessBuilder;
    ///
    /// let token = CancellationToken::new();
    /// let output = ProcessBuilder::new("cmake")
    ///     .arg("--build")
    ///     .arg("build")
    ///     .run_with_cancellation(token)
    ///     .await?;
    /// ```
    pub async fn run_with_cancellation(self, token: CancellationToken) -> Result<ProcessOutput> {
        if token.is_cancelled() {
            return Ok(ProcessOutput::new(-1, String::new(), true));
        }

        let name = self.display_name();
        let cmd_line = self.command_line();
        debug!(cmd = %cmd_line, "exec");

        let mut child = self
            .build_command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;

        trace!(process = %name, pid = ?child.id(), "spawned");

        let output = self.run_child(&name, &mut child, token).await?;

        if !output.is_interrupted() && !output.success() {
            if !output.stderr().is_empty() {
                error!(process = %name, stderr = %output.stderr(), "process error output");
            }
            return Err(ProcessError::NonZeroExit {
                command: name,
                code: output.exit_code(),
            }
            .into());
        }

        trace!(
            process = %name,
            exit_code = output.exit_code(),
            interrupted = output.is_interrupted(),
            "completed"
        );
        Ok(output)
    }

    /// Builds the tokio Command from this builder's configuration.
    fn build_command(&self) -> Command {
        let mut command = Command::new(self.program());
        command.args(self.args_slice());
        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Self::stdio_from_flags(self.stderr_config()));
        command.kill_on_drop(true);
        command
    }

    /// Converts `StreamFlags` to Stdio configuration.
    fn stdio_from_flags(flags: StreamFlags) -> Stdio {
        if flags.is_empty() {
            Stdio::null()
        } else {
            Stdio::piped()
        }
    }
}
