//! Integration tests for the stdin-to-JSON workflow
//!
//! These tests run the built binary end to end:
//! - Reading text or HTML from stdin
//! - Writing the JSON document to stdout
//! - Exit status and stderr for error scenarios

#[cfg(test)]
mod stdin_conversion_tests {
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::process::{Command, Output, Stdio};

    fn run_htmljson_stdin(input: &str, args: &[&str]) -> Output {
        let mut child = Command::new(env!("CARGO_BIN_EXE_htmljson"))
            .args(args)
            .env_remove("RUST_LOG")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to start htmljson");

        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("failed to write stdin");

        child.wait_with_output().expect("failed to wait for htmljson")
    }

    /// Test basic stdin conversion of plain text
    #[test]
    fn test_plain_text_from_stdin() {
        let output = run_htmljson_stdin("Hello world\nSecond line\n", &["--stdin"]);
        let stdout = String::from_utf8(output.stdout).unwrap();

        assert!(output.status.success());
        assert_eq!(
            stdout,
            "{\n  \"input\": \"Hello world\\nSecond line\",\n  \"length\": 23,\n  \"words\": [\n    \"Hello\",\n    \"world\",\n    \"Second\",\n    \"line\"\n  ],\n  \"lines\": [\n    \"Hello world\",\n    \"Second line\"\n  ]\n}\n"
        );
        assert!(output.stderr.is_empty());
    }

    /// Input is read from stdin when no argument is given
    #[test]
    fn test_stdin_is_default_source() {
        let output = run_htmljson_stdin("<p>Hi <a href=\"http://x.test\">link</a></p>", &[]);
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

        assert!(output.status.success());
        assert_eq!(value["tags"], serde_json::json!(["p", "a"]));
        assert_eq!(value["links"], serde_json::json!(["http://x.test"]));
        assert_eq!(value["text"], "Hi link");
    }

    /// Whitespace-only stdin fails with a non-zero exit status
    #[test]
    fn test_empty_stdin_fails() {
        let output = run_htmljson_stdin("  \n\t\n", &["--stdin"]);
        let stderr = String::from_utf8(output.stderr).unwrap();

        assert_eq!(output.status.code(), Some(2));
        assert!(output.stdout.is_empty());
        assert!(stderr.contains("Please enter some text or HTML to convert to JSON"));
    }

    /// Statistics go to stderr, leaving stdout as pure JSON
    #[test]
    fn test_stats_are_written_to_stderr() {
        let output = run_htmljson_stdin("<ul><li>a</li></ul>", &["--stdin", "--stats"]);
        let stderr = String::from_utf8(output.stderr).unwrap();

        assert!(output.status.success());
        assert!(serde_json::from_slice::<serde_json::Value>(&output.stdout).is_ok());
        assert!(stderr.contains("Detected input: html"));
        assert!(stderr.contains("Elements: 2"));
    }

    /// Interactive mode without the intro generates on command
    #[test]
    fn test_interactive_session_over_stdin() {
        let output = run_htmljson_stdin(
            "<b>bold</b>\n:generate\n:clear\n:quit\n",
            &["--interactive", "--no-intro"],
        );
        let stdout = String::from_utf8(output.stdout).unwrap();

        assert!(output.status.success());
        assert!(stdout.starts_with("/jso [html or text to convert to JSON]\n"));
        assert!(stdout.contains("JSON Output:\n{\n  \"html\": \"<b>bold</b>\""));
        assert!(stdout.contains("JSON generated successfully"));
        assert!(stdout.contains("Cleared input and output"));
    }

    /// Pasted paragraphs keep their blank separator line
    #[test]
    fn test_interactive_paste_with_blank_line() {
        let output = run_htmljson_stdin("para one\n\npara two\n", &["-i", "--no-intro"]);
        let stdout = String::from_utf8(output.stdout).unwrap();

        assert!(output.status.success());
        assert_eq!(stdout.matches("JSON Output:").count(), 1);
        assert!(stdout.contains("\"input\": \"para one\\n\\npara two\""));
        assert!(stdout.contains("\"lines\": [\n    \"para one\",\n    \"\",\n    \"para two\"\n  ]"));
    }
}
