//! Short-lived external command execution
//!
//! Every failure (missing binary, non-zero exit, timeout, bad output) turns into
//! an empty string. Callers treat "no output" as "no data".

use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Hard limit for a single command invocation
pub const COMMAND_TIMEOUT: Duration = Duration::from_millis(1500);

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("empty command line")]
    Empty,
    #[error("unbalanced quotes in command line")]
    UnbalancedQuote,
    #[error("failed to run {0}: {1}")]
    Spawn(String, #[source] std::io::Error),
    #[error("{0} timed out after {1:?}")]
    Timeout(String, Duration),
    #[error("{0} exited with {1}")]
    Failed(String, ExitStatus),
    #[error("{0} wrote non-UTF-8 output")]
    Decode(String),
}

/// Runs commands with a timeout, capturing trimmed stdout
#[derive(Clone, Debug)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(COMMAND_TIMEOUT)
    }
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run a shell-style command line (quotes and backslashes honoured, no shell involved)
    pub async fn run(&self, command_line: &str) -> String {
        let argv = match split_command_line(command_line) {
            Ok(argv) => argv,
            Err(e) => {
                debug!("Not running '{}': {}", command_line, e);
                return String::new();
            }
        };
        let args: Vec<&str> = argv[1..].iter().map(String::as_str).collect();
        self.run_args(&argv[0], &args).await
    }

    /// Run a program with already-split arguments
    pub async fn run_args(&self, program: &str, args: &[&str]) -> String {
        match self.try_run(program, args).await {
            Ok(stdout) => stdout,
            Err(e) => {
                debug!("Command failed: {}", e);
                String::new()
            }
        }
    }

    async fn try_run(&self, program: &str, args: &[&str]) -> Result<String, ProcessError> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProcessError::Spawn(program.to_string(), e))?;

        // Dropping the timed-out future drops the child, which kills it
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ProcessError::Timeout(program.to_string(), self.timeout))?
            .map_err(|e| ProcessError::Spawn(program.to_string(), e))?;

        if !output.status.success() {
            return Err(ProcessError::Failed(program.to_string(), output.status));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| ProcessError::Decode(program.to_string()))?;
        Ok(stdout.trim().to_string())
    }
}

/// Split a command line into arguments using POSIX shell quoting rules:
/// single quotes are literal, double quotes allow `\"`, `\\`, `\$` and `` \` ``,
/// a bare backslash escapes the next character.
pub fn split_command_line(line: &str) -> Result<Vec<String>, ProcessError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_arg = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(ch) => current.push(ch),
                        None => return Err(ProcessError::UnbalancedQuote),
                    }
                }
            }
            '"' => {
                in_arg = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(ch @ ('"' | '\\' | '$' | '`')) => current.push(ch),
                            Some('\n') => {}
                            Some(ch) => {
                                current.push('\\');
                                current.push(ch);
                            }
                            None => return Err(ProcessError::UnbalancedQuote),
                        },
                        Some(ch) => current.push(ch),
                        None => return Err(ProcessError::UnbalancedQuote),
                    }
                }
            }
            '\\' => {
                in_arg = true;
                match chars.next() {
                    Some('\n') => {}
                    Some(ch) => current.push(ch),
                    None => return Err(ProcessError::UnbalancedQuote),
                }
            }
            c if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            c => {
                in_arg = true;
                current.push(c);
            }
        }
    }

    if in_arg {
        args.push(current);
    }
    if args.is_empty() {
        return Err(ProcessError::Empty);
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<String> {
        split_command_line(line).unwrap()
    }

    #[test]
    fn test_split_plain_words() {
        assert_eq!(split("playerctl -l"), vec!["playerctl", "-l"]);
        assert_eq!(split("  playerctl   -p  spotify status "), vec!["playerctl", "-p", "spotify", "status"]);
    }

    #[test]
    fn test_split_quotes() {
        assert_eq!(
            split("playerctl metadata -f '{{title}}|{{artist}}'"),
            vec!["playerctl", "metadata", "-f", "{{title}}|{{artist}}"]
        );
        assert_eq!(split(r#"echo "a \"b\" c""#), vec!["echo", r#"a "b" c"#]);
        assert_eq!(split(r"echo a\ b"), vec!["echo", "a b"]);
        assert_eq!(split("echo '' x"), vec!["echo", "", "x"]);
        assert_eq!(split("echo it'\"'s"), vec!["echo", "it\"s"]);
    }

    #[test]
    fn test_split_errors() {
        assert!(matches!(split_command_line(""), Err(ProcessError::Empty)));
        assert!(matches!(split_command_line("   "), Err(ProcessError::Empty)));
        assert!(matches!(split_command_line("echo 'oops"), Err(ProcessError::UnbalancedQuote)));
        assert!(matches!(split_command_line("echo \"oops"), Err(ProcessError::UnbalancedQuote)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captures_trimmed_stdout() {
        let runner = ProcessRunner::default();
        assert_eq!(runner.run("sh -c 'echo \"  hello world  \"'").await, "hello world");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_discards_stderr() {
        let runner = ProcessRunner::default();
        assert_eq!(runner.run("sh -c 'echo oops 1>&2'").await, "");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_failures_are_empty() {
        let runner = ProcessRunner::default();
        assert_eq!(runner.run("sh -c 'echo partial; exit 3'").await, "");
        assert_eq!(runner.run("definitely-not-a-real-binary-nowplaying").await, "");
        assert_eq!(runner.run("echo 'unbalanced").await, "");
        assert_eq!(runner.run("").await, "");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_times_out() {
        let runner = ProcessRunner::new(Duration::from_millis(100));
        let started = std::time::Instant::now();
        assert_eq!(runner.run("sleep 5").await, "");
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_args_keeps_arguments_verbatim() {
        let runner = ProcessRunner::default();
        assert_eq!(runner.run_args("echo", &["it's", "a|b"]).await, "it's a|b");
    }
}
