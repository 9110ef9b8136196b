//! Subprocess invocation for the QA binaries.
//!
//! The binary's stdout is streamed line by line so long runs stay watchable,
//! and everything is mirrored into `log.txt` inside the output folder so the
//! result remains traceable after the terminal is gone.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use anyhow::{bail, Context, Result};

/// A QA binary invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(program: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Rendering used for logs and error messages.
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Runs the invocation, mirroring stdout to the console (unless `quiet`)
    /// and into `log_file` when given. Stderr is appended after the run so
    /// the two streams cannot interleave mid-line in the log.
    ///
    /// Returns the captured stdout. A non-zero exit status is an error
    /// carrying the exit code and the command line.
    pub fn run_logged(&self, log_file: Option<&Path>, quiet: bool) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn '{}'", self.program.display()))?;

        // Drain stderr on a separate thread; reading the two pipes from one
        // thread can deadlock once either buffer fills up.
        let stderr_pipe = child.stderr.take();
        let stderr_reader = thread::spawn(move || {
            let mut buffer = String::new();
            if let Some(mut pipe) = stderr_pipe {
                let _ = pipe.read_to_string(&mut buffer);
            }
            buffer
        });

        let mut log = match log_file {
            Some(path) => Some(
                File::create(path)
                    .with_context(|| format!("failed to create log file '{}'", path.display()))?,
            ),
            None => None,
        };

        let mut captured_lines = Vec::new();
        if let Some(stdout_pipe) = child.stdout.take() {
            for line in BufReader::new(stdout_pipe).lines() {
                let line = line.context("failed to read subprocess output")?;
                if !quiet {
                    println!("{line}");
                }
                if let Some(ref mut log) = log {
                    writeln!(log, "{line}")?;
                }
                captured_lines.push(line);
            }
        }

        let status = child.wait().context("failed to wait for subprocess")?;
        let stderr = stderr_reader
            .join()
            .unwrap_or_default();
        if !stderr.is_empty() {
            if !quiet {
                eprint!("{stderr}");
            }
            if let Some(ref mut log) = log {
                write!(log, "{stderr}")?;
            }
        }

        if !status.success() {
            bail!(
                "'{}' exited with status {}",
                self.command_line(),
                status.code().unwrap_or(-1)
            );
        }
        Ok(captured_lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_command_line_rendering() {
        let invocation = Invocation::new(Path::new("/bin/app"))
            .arg("-f")
            .arg("config.ini");
        assert_eq!(invocation.command_line(), "/bin/app -f config.ini");
    }

    #[test]
    #[cfg(unix)]
    fn test_run_logged_copies_stdout_to_log_file() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("log.txt");

        let output = Invocation::new(Path::new("echo"))
            .arg("hello world!")
            .run_logged(Some(&log), true)
            .unwrap();

        assert_eq!(output, "hello world!");
        assert_eq!(fs::read_to_string(&log).unwrap(), "hello world!\n");
    }

    #[test]
    #[cfg(unix)]
    fn test_run_logged_reports_non_zero_exit() {
        let err = Invocation::new(Path::new("false"))
            .run_logged(None, true)
            .unwrap_err();
        assert!(err.to_string().contains("exited with status 1"));
    }
}
