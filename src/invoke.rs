use crate::error::GeminiError;
use crate::parse::{ParsedStdout, parse_cli_stdout};
use crate::types::AttemptOutcome;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Run the Gemini CLI once, bounded by a hard timeout.
///
/// All failure modes are captured in the returned outcome; nothing is
/// thrown past this boundary. Dropping the returned future while the child
/// is still running kills it (`kill_on_drop`), so a cancelled or timed-out
/// attempt cannot leak a process-table entry.
pub async fn invoke_once(
    gemini_path: &Path,
    prompt: &str,
    context: &str,
    model: Option<&str>,
    timeout: Duration,
    session_id: Option<&str>,
) -> AttemptOutcome {
    let args = build_args(prompt, model, session_id);
    debug!("Invoking gemini with args: {:?}", args);

    let mut cmd = Command::new(gemini_path);
    cmd.args(&args)
        .stdin(if context.is_empty() {
            Stdio::null()
        } else {
            Stdio::piped()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            return AttemptOutcome::failure(GeminiError::SpawnError {
                command: gemini_path.display().to_string(),
                source: e,
            });
        }
    };

    if !context.is_empty()
        && let Some(mut stdin) = child.stdin.take()
    {
        // Write concurrently so a large context can't deadlock against a
        // filling stdout pipe.
        let data = context.as_bytes().to_vec();
        tokio::spawn(async move {
            let _ = stdin.write_all(&data).await;
            let _ = stdin.shutdown().await;
        });
    }

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            return AttemptOutcome::failure(GeminiError::SpawnError {
                command: gemini_path.display().to_string(),
                source: e,
            });
        }
        Err(_) => {
            // The dropped wait future owns the child; kill_on_drop reaps it.
            return AttemptOutcome::failure(GeminiError::Timeout {
                secs: timeout.as_secs(),
            });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stderr = if stderr.is_empty() {
            "unknown error".to_string()
        } else {
            stderr
        };
        return AttemptOutcome::failure(GeminiError::ProcessFailed {
            code: output.status.code().unwrap_or(-1),
            stderr,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match parse_cli_stdout(&stdout) {
        ParsedStdout::Structured { answer, stats } => AttemptOutcome::success(answer, stats),
        ParsedStdout::PlainText(text) => AttemptOutcome::success(text, None),
    }
}

fn build_args(prompt: &str, model: Option<&str>, session_id: Option<&str>) -> Vec<String> {
    let mut args = vec![
        "-p".to_string(),
        prompt.to_string(),
        "-o".to_string(),
        "json".to_string(),
    ];
    if let Some(model) = model {
        args.push("-m".to_string());
        args.push(model.to_string());
    }
    if let Some(session_id) = session_id {
        args.push("-r".to_string());
        args.push(session_id.to_string());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args_minimal() {
        let args = build_args("What is 2+2?", None, None);
        assert_eq!(args, vec!["-p", "What is 2+2?", "-o", "json"]);
    }

    #[test]
    fn test_build_args_with_model_and_session() {
        let args = build_args("hello", Some("gemini-2.5-pro"), Some("sess-1"));
        assert_eq!(
            args,
            vec![
                "-p",
                "hello",
                "-o",
                "json",
                "-m",
                "gemini-2.5-pro",
                "-r",
                "sess-1"
            ]
        );
    }

    #[tokio::test]
    async fn test_invoke_nonexistent_binary_is_spawn_failure() {
        let outcome = invoke_once(
            Path::new("/nonexistent/gemini-binary"),
            "hi",
            "",
            None,
            Duration::from_secs(5),
            None,
        )
        .await;

        assert!(!outcome.succeeded);
        assert!(outcome.text.starts_with("Error: failed to run gemini CLI"));
    }
}
