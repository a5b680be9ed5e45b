//! Unit tests for the presentation shell session: buffer handling,
//! status line transitions and error notifications.

use htmljson::conversion::ConversionConfig;
use htmljson::shell::{Frame, IntroAnimation, Session, Status};
use std::time::Duration;

#[cfg(test)]
mod session_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_fills_output_and_sets_status() {
        let mut session = Session::default();
        session.set_input("<p>Hi</p>");

        assert!(session.generate().is_ok());
        assert_eq!(session.status(), &Status::Generated);
        assert!(session.output().starts_with("{\n  \"html\": \"<p>Hi</p>\""));
        assert_eq!(session.input(), "<p>Hi</p>");
    }

    #[test]
    fn test_empty_input_notifies_and_keeps_previous_output() {
        let mut session = Session::default();
        session.set_input("first run");
        session.generate().unwrap();
        let previous = session.output().to_string();

        session.set_input("   \n ");
        let notification = session.generate().unwrap_err();

        assert_eq!(notification.title, "Error");
        assert_eq!(
            notification.body,
            "Please enter some text or HTML to convert to JSON"
        );
        assert_eq!(session.status().to_string(), "Error: No input provided");
        assert_eq!(session.output(), previous);
    }

    #[test]
    fn test_clear_empties_both_regions() {
        let mut session = Session::default();
        session.set_input("text");
        session.generate().unwrap();

        session.clear();
        assert_eq!(session.input(), "");
        assert_eq!(session.output(), "");
        assert_eq!(session.status().to_string(), "Cleared input and output");
    }

    #[test]
    fn test_session_uses_its_config() {
        let mut session = Session::new(ConversionConfig::compact());
        session.set_input("a b");
        session.generate().unwrap();
        assert_eq!(
            session.output(),
            r#"{"input":"a b","length":3,"words":["a","b"],"lines":["a b"]}"#
        );
    }

    #[test]
    fn test_regenerating_same_input_is_stable() {
        let mut session = Session::default();
        session.set_input("<a href='/x'>x</a>");
        session.generate().unwrap();
        let first = session.output().to_string();
        session.generate().unwrap();
        assert_eq!(session.output(), first);
    }

    #[test]
    fn test_intro_eventually_hands_off() {
        let intro = IntroAnimation::default();
        let mut elapsed = Duration::ZERO;
        let mut frames = 0;
        while let Frame::Intro(_) = intro.frame_at(elapsed) {
            elapsed += intro.tick();
            frames += 1;
            assert!(frames < 1000, "intro never completed");
        }
        assert_eq!(elapsed, intro.handoff());
    }
}
