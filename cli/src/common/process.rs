//! # scriptrun Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Wrappers around `tokio::process::Command` for running an external program
//! in a given working directory and capturing its **combined** output: stdout
//! and stderr are drained concurrently into one buffer, line by line, in the
//! order lines arrive. Relative ordering between the two streams is
//! best-effort, as with any merge of two pipes.
//!
//! ## Architecture
//!
//! - **`spawn_merged`**: builds and starts the child (stdin null, both output
//!   pipes captured, `kill_on_drop`).
//! - **`drain_combined`**: reads both pipes until each reaches EOF, then waits
//!   for the exit status.
//! - **`run_merged`**: the two steps above plus an optional timeout. On
//!   timeout the child is killed before returning.
//!
//! A child that never exits keeps `run_merged` pending for as long as no
//! timeout is given.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process;
//! use std::path::Path;
//!
//! # async fn run_example() -> Result<(), crate::core::error::ScriptRunError> {
//! let args = vec!["-c".to_string(), "echo hi; echo oops >&2; exit 2".to_string()];
//! let captured = process::run_merged("sh", &args, Path::new("/tmp"), None).await?;
//! assert_eq!(captured.exit_code, 2);
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::ScriptRunError;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{debug, trace, warn};

/// Exit code and combined output of a finished process, whatever the exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub exit_code: i32,
    /// Every line from stdout and stderr, each followed by `\n`.
    pub output: String,
}

impl CapturedOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Starts `program` with `args` in `cwd`, with stdout and stderr piped.
pub fn spawn_merged(program: &str, args: &[String], cwd: &Path) -> Result<Child, ScriptRunError> {
    debug!(
        "Spawning {:?} with args {:?} in {}",
        program,
        args,
        cwd.display()
    );
    Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ScriptRunError::Launch {
            program: program.to_string(),
            source,
        })
}

/// Reads the child's stdout and stderr to EOF into one buffer, then waits for it.
pub async fn drain_combined(child: &mut Child) -> Result<CapturedOutput, ScriptRunError> {
    let stdout = child
        .stdout
        .take()
        .ok_or(ScriptRunError::StreamUnavailable("stdout"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or(ScriptRunError::StreamUnavailable("stderr"))?;

    let mut out_lines = LineReader::new(BufReader::new(stdout));
    let mut err_lines = LineReader::new(BufReader::new(stderr));
    let (mut out_open, mut err_open) = (true, true);
    let mut output = String::new();

    while out_open || err_open {
        tokio::select! {
            line = out_lines.next_line(), if out_open => {
                match line.map_err(ScriptRunError::ReadOutput)? {
                    Some(line) => push_line(&mut output, &line),
                    None => out_open = false,
                }
            }
            line = err_lines.next_line(), if err_open => {
                match line.map_err(ScriptRunError::ReadOutput)? {
                    Some(line) => push_line(&mut output, &line),
                    None => err_open = false,
                }
            }
        }
    }

    let status = child.wait().await.map_err(ScriptRunError::Wait)?;
    let exit_code = exit_code_of(status);
    debug!("Process exited with status {status} (code {exit_code})");
    Ok(CapturedOutput { exit_code, output })
}

/// Spawns, drains and waits, killing the child if `timeout` elapses first.
pub async fn run_merged(
    program: &str,
    args: &[String],
    cwd: &Path,
    timeout: Option<Duration>,
) -> Result<CapturedOutput, ScriptRunError> {
    let mut child = spawn_merged(program, args, cwd)?;
    let Some(limit) = timeout else {
        return drain_combined(&mut child).await;
    };

    let drained = tokio::time::timeout(limit, drain_combined(&mut child)).await;
    match drained {
        Ok(result) => result,
        Err(_) => {
            warn!(
                "Process {:?} still running after {}s; killing it.",
                program,
                limit.as_secs()
            );
            if let Err(e) = child.kill().await {
                warn!("Failed to kill timed-out process: {e}");
            }
            Err(ScriptRunError::TimedOut {
                secs: limit.as_secs(),
            })
        }
    }
}

fn push_line(buffer: &mut String, line: &str) {
    trace!("output: {line}");
    buffer.push_str(line);
    buffer.push('\n');
}

/// Maps an exit status to an integer; signal deaths become `128 + signal` on Unix.
fn exit_code_of(status: ExitStatus) -> i32 {
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
    -1
}

/// Line reader that keeps partial lines across cancelled reads, so it can be
/// polled from `tokio::select!`. Invalid UTF-8 is replaced lossily.
struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        let read = self.reader.read_until(b'\n', &mut self.buf).await?;
        if read == 0 && self.buf.is_empty() {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        let line = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        Ok(Some(line))
    }
}
