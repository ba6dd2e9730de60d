//! Builder for executing external tool commands.
//!
//! Every invocation blocks until the child exits. Pipes are owned by the
//! builder's scope, so they are closed whatever the exit status.

use std::collections::VecDeque;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::{Error, Result};

/// Number of trailing stderr lines kept for error messages.
const STDERR_TAIL: usize = 20;

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// # Example
///
/// ```no_run
/// use tubeprep_av::ToolCommand;
/// use std::path::PathBuf;
///
/// let output = ToolCommand::new(PathBuf::from("ffprobe"))
///     .args(["-v", "quiet", "-print_format", "json", "-show_streams"])
///     .arg("/path/to/video.mkv")
///     .execute()?;
/// println!("{}", output.stdout);
/// # Ok::<(), tubeprep_av::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<String>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append a path argument.
    pub fn path_arg(&mut self, path: &Path) -> &mut Self {
        self.args.push(path.to_string_lossy().into_owned());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    #[cfg(test)]
    fn get_args(&self) -> &[String] {
        &self.args
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    fn spawn_error(&self, e: std::io::Error) -> Error {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::tool_not_found(self.program_name())
        } else {
            Error::tool_failed(self.program_name(), format!("failed to spawn: {e}"))
        }
    }

    /// Run the command and wait for it, returning output regardless of status.
    pub fn output(&self) -> Result<ToolOutput> {
        tracing::trace!(program = %self.program.display(), args = ?self.args, "running tool");

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        Ok(ToolOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Execute the command, failing with [`Error::ToolFailed`] on a non-zero exit.
    pub fn execute(&self) -> Result<ToolOutput> {
        let output = self.output()?;

        if !output.status.success() {
            return Err(Error::tool_failed(
                self.program_name(),
                format!("exited with status {}: {}", output.status, output.stderr.trim()),
            ));
        }

        Ok(output)
    }

    /// Execute the command, feeding every stderr line to `on_line` as it arrives.
    ///
    /// Stdout is discarded. On a non-zero exit the last stderr lines are
    /// included in the error message.
    pub fn execute_with_stderr_lines(&self, mut on_line: impl FnMut(&str)) -> Result<ExitStatus> {
        tracing::trace!(program = %self.program.display(), args = ?self.args, "running tool (streaming)");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let mut tail: VecDeque<String> = VecDeque::with_capacity(STDERR_TAIL);

        if let Some(stderr) = child.stderr.take() {
            for line in BufReader::new(stderr).lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(e) => {
                        tracing::debug!("stopped reading {} stderr: {}", self.program_name(), e);
                        break;
                    }
                };
                on_line(&line);
                if !is_progress_line(&line) {
                    if tail.len() == STDERR_TAIL {
                        tail.pop_front();
                    }
                    tail.push_back(line);
                }
            }
        }

        let status = child.wait()?;

        if !status.success() {
            let stderr: Vec<String> = tail.into_iter().collect();
            return Err(Error::tool_failed(
                self.program_name(),
                format!("exited with status {}: {}", status, stderr.join("\n").trim()),
            ));
        }

        Ok(status)
    }
}

/// `key=value` lines emitted by `ffmpeg -progress`.
fn is_progress_line(line: &str) -> bool {
    match line.split_once('=') {
        Some((key, _)) => {
            !key.is_empty()
                && key
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
        }
        None => false,
    }
}
