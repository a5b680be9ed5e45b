//! Usability tests for the command-line surface: argument input, output
//! options, help text and exit codes.

#[cfg(test)]
mod usability_tests {
    use pretty_assertions::assert_eq;
    use std::process::{Command, Output, Stdio};

    fn run_htmljson(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_htmljson"))
            .args(args)
            .env_remove("RUST_LOG")
            .stdin(Stdio::null())
            .output()
            .expect("failed to run htmljson")
    }

    fn stdout_of(output: &Output) -> String {
        String::from_utf8(output.stdout.clone()).unwrap()
    }

    #[test]
    fn test_argument_input() {
        let output = run_htmljson(&["<a>no href here</a>"]);

        assert!(output.status.success());
        assert_eq!(
            stdout_of(&output),
            "{\n  \"html\": \"<a>no href here</a>\",\n  \"text\": \"no href here\",\n  \"tags\": [\n    \"a\"\n  ],\n  \"links\": []\n}\n"
        );
    }

    #[test]
    fn test_empty_href_is_not_a_link() {
        let output = run_htmljson(&["--compact", "<a href=\"\">empty href</a>"]);

        assert!(output.status.success());
        assert_eq!(
            stdout_of(&output),
            "{\"html\":\"<a href=\\\"\\\">empty href</a>\",\"text\":\"empty href\",\"tags\":[\"a\"],\"links\":[]}\n"
        );
    }

    #[test]
    fn test_indent_option() {
        let output = run_htmljson(&["--indent", "4", "word"]);
        assert!(output.status.success());
        assert!(stdout_of(&output).starts_with("{\n    \"input\": \"word\","));
    }

    #[test]
    fn test_ascii_option() {
        let output = run_htmljson(&["--compact", "--ascii", "naïve"]);
        assert!(output.status.success());
        assert!(stdout_of(&output).contains("\"input\":\"na\\u00efve\""));
    }

    #[test]
    fn test_invalid_indent_is_rejected() {
        let output = run_htmljson(&["--indent", "12", "word"]);
        let stderr = String::from_utf8(output.stderr).unwrap();

        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());
        assert!(stderr.contains("Indent size must be 0-8 spaces"));
    }

    #[test]
    fn test_blank_argument_exits_non_zero() {
        let output = run_htmljson(&["   "]);
        let stderr = String::from_utf8(output.stderr).unwrap();

        assert_eq!(output.status.code(), Some(2));
        assert!(stderr.contains("Try 'htmljson --help' for usage information."));
    }

    #[test]
    fn test_verbose_logs_to_stderr_only() {
        let output = run_htmljson(&["--verbose", "plain words"]);
        let stderr = String::from_utf8(output.stderr).unwrap();

        assert!(output.status.success());
        assert!(serde_json::from_slice::<serde_json::Value>(&output.stdout).is_ok());
        assert!(stderr.contains("classified input"));
    }

    #[test]
    fn test_help_mentions_interactive_mode() {
        let output = run_htmljson(&["--help"]);
        assert!(output.status.success());
        let help = stdout_of(&output);
        assert!(help.contains("--interactive"));
        assert!(help.contains("--compact"));
    }
}
