//! Bounded subprocess probes.
//!
//! Every piece of information the scanner extracts from an interpreter or
//! tool comes from running it as a child process. A broken candidate must
//! never stall or abort a scan, so every invocation goes through
//! [`run_probe`], which bounds the wait and reports failure as a value.
//! [`ProbeFailure`] is handled at each call site and never escapes the
//! scanner's public API.

use regex::Regex;
use std::ffi::OsStr;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};

/// How often the runner polls a child that hasn't exited yet.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Why a probe produced no usable output.
#[derive(Debug)]
pub enum ProbeFailure {
    /// The process could not be started (missing binary, not executable).
    Spawn(std::io::Error),
    /// The process did not exit within the bound and was killed.
    Timeout,
}

/// Captured output of a completed probe.
#[derive(Debug)]
pub struct ProbeOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProbeOutput {
    /// Whether the probe exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run a program with a bounded wait.
///
/// Output is drained on reader threads so a chatty child cannot block on a
/// full pipe while we wait for it. On timeout the child is killed and
/// reaped before returning.
pub fn run_probe<S: AsRef<OsStr>>(
    program: S,
    args: &[&str],
    timeout: Duration,
) -> Result<ProbeOutput, ProbeFailure> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(ProbeFailure::Spawn)?;

    let stdout = child.stdout.take().unwrap();
    let stderr = child.stderr.take().unwrap();

    let stdout_handle = thread::spawn(move || read_to_string_lossy(stdout));
    let stderr_handle = thread::spawn(move || read_to_string_lossy(stderr));

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                return Ok(ProbeOutput {
                    exit_code: status.code(),
                    stdout: stdout_handle.join().unwrap_or_default(),
                    stderr: stderr_handle.join().unwrap_or_default(),
                });
            }
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = stdout_handle.join();
                    let _ = stderr_handle.join();
                    return Err(ProbeFailure::Timeout);
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ProbeFailure::Spawn(e));
            }
        }
    }
}

fn read_to_string_lossy<R: Read>(mut reader: R) -> String {
    let mut buf = Vec::new();
    let _ = reader.read_to_end(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Extract the version number from interpreter `--version` output.
///
/// Python 3 prints the banner to stdout; Python 2 printed it to stderr,
/// so both streams are consulted.
fn parse_version(stdout: &str, stderr: &str) -> Option<String> {
    static VERSION_RE: OnceLock<Regex> = OnceLock::new();
    let re = VERSION_RE.get_or_init(|| Regex::new(r"Python\s+(\S+)").unwrap());

    for output in [stdout, stderr] {
        if let Some(caps) = re.captures(output) {
            return Some(caps[1].to_string());
        }
    }
    None
}

/// Get the version string of an interpreter.
///
/// "Unknown" when the interpreter ran but its banner could not be parsed
/// (or it exited non-zero); "Error" when it could not be run at all.
pub fn probe_version(path: &Path, timeout: Duration) -> String {
    match run_probe(path, &["--version"], timeout) {
        Ok(out) if out.success() => {
            parse_version(&out.stdout, &out.stderr).unwrap_or_else(|| "Unknown".to_string())
        }
        Ok(out) => {
            tracing::debug!(path = %path.display(), code = ?out.exit_code, "version probe exited non-zero");
            "Unknown".to_string()
        }
        Err(failure) => {
            tracing::debug!(path = %path.display(), ?failure, "version probe failed");
            "Error".to_string()
        }
    }
}

/// Self-test an interpreter: it must run a trivial program and print
/// exactly `OK`.
pub fn verify(path: &Path, timeout: Duration) -> bool {
    match run_probe(path, &["-c", r#"print("OK")"#], timeout) {
        Ok(out) => out.success() && out.stdout.trim() == "OK",
        Err(failure) => {
            tracing::debug!(path = %path.display(), ?failure, "self-test failed");
            false
        }
    }
}

/// Check whether a tool can be invoked from PATH.
///
/// Present means the process could be spawned and finished within the
/// bound; the exit code is ignored, since a tool that launches but exits
/// non-zero on `--version` is still installed.
pub fn command_exists(tool: &str, timeout: Duration) -> bool {
    run_probe(tool, &["--version"], timeout).is_ok()
}
