// Running external tools (ollama, espeak-ng) with service-typed failures.
use std::io::{self, ErrorKind, Read};
use std::process::{Command, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::ServiceError;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs `cmd` to completion, killing it once `timeout` elapses.
/// A non-zero exit is reported as `Failed` with the tool's stderr.
pub fn run(mut cmd: Command, service: &'static str, timeout: Option<Duration>) -> Result<Output, ServiceError> {
    debug!(?cmd, service, "spawning");
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => ServiceError::Unavailable {
                service,
                reason: String::from("executable not found on PATH"),
            },
            _ => ServiceError::Failed { service, reason: e.to_string() },
        })?;

    // Drain both pipes while waiting so a chatty child never blocks on a full pipe.
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let status = match timeout {
        Some(limit) => {
            let started = Instant::now();
            loop {
                match child.try_wait() {
                    Ok(Some(status)) => break status,
                    Ok(None) if started.elapsed() >= limit => {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(ServiceError::Timeout { service, secs: limit.as_secs() });
                    }
                    Ok(None) => thread::sleep(POLL_INTERVAL),
                    Err(e) => return Err(ServiceError::Failed { service, reason: e.to_string() }),
                }
            }
        }
        None => child.wait().map_err(|e| ServiceError::Failed { service, reason: e.to_string() })?,
    };

    let output = Output { status, stdout: collect(stdout, service)?, stderr: collect(stderr, service)? };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let reason = if stderr.is_empty() { format!("exited with {}", output.status) } else { stderr };
        return Err(ServiceError::Failed { service, reason });
    }
    Ok(output)
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn collect(reader: Option<JoinHandle<io::Result<Vec<u8>>>>, service: &'static str) -> Result<Vec<u8>, ServiceError> {
    let Some(handle) = reader else { return Ok(Vec::new()) };
    match handle.join() {
        Ok(Ok(buf)) => Ok(buf),
        Ok(Err(e)) => Err(ServiceError::Failed { service, reason: e.to_string() }),
        Err(_) => Err(ServiceError::Failed { service, reason: String::from("output reader panicked") }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_unavailable() {
        let cmd = Command::new("definitely-not-an-installed-tool-xyz");
        let err = run(cmd, "tool", None).unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable { service: "tool", .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_success_captures_stdout() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("printf hello");
        let out = run(cmd, "sh", Some(Duration::from_secs(5))).unwrap();
        assert_eq!(String::from_utf8_lossy(&out.stdout), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_reports_stderr() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("echo broken >&2; exit 3");
        let err = run(cmd, "sh", None).unwrap_err();
        assert_eq!(err, ServiceError::Failed { service: "sh", reason: "broken".into() });
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_child() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("sleep 5");
        let err = run(cmd, "sh", Some(Duration::from_millis(100))).unwrap_err();
        assert!(matches!(err, ServiceError::Timeout { service: "sh", .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_large_output_does_not_stall() {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg("head -c 200000 /dev/zero | tr '\\0' a; head -c 100000 /dev/zero | tr '\\0' b >&2");
        let started = Instant::now();
        let out = run(cmd, "sh", Some(Duration::from_secs(10))).unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(out.stdout.len(), 200000);
        assert!(out.stdout.iter().all(|&b| b == b'a'));
        assert_eq!(out.stderr.len(), 100000);
    }
}
